//! Lists every output driver libao knows about.

use aout::Ao;

fn main() {
    let ao = Ao::new();
    let default = ao.default_driver_id();

    for driver in ao.drivers() {
        let marker = if Some(driver.id()) == default { "*" } else { " " };
        let kind = if driver.is_live() { "live" } else { "file" };
        println!(
            "{marker} {:>2} {:<10} {kind} priority {:>2}  {}",
            driver.id().get(),
            driver.short_name(),
            driver.priority(),
            driver.name()
        );
        if !driver.options().is_empty() {
            println!("       options: {}", driver.options().join(", "));
        }
    }
}
