// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(
    all(feature = "app", not(debug_assertions)),
    windows_subsystem = "windows"
)]

fn main() {
    brooder_monitor_lib::run()
}
