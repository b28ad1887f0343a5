// The pure state machines are only driven by the browser layer; native builds
// compile them for the unit tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod animations;
mod config;
mod cursor;
mod logging;
mod navigation;
mod notifier;
mod particles;
mod performance;
mod portfolio;
mod sections;
mod slider;
mod typing;
mod video;
mod whatsapp;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
