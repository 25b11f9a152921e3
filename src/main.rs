// Host builds only compile the page logic for its unit tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod carousel;
mod config;
mod error;
mod filter;
mod hover;
mod logging;
mod modal;
mod project;
mod theme;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate enhances a static page in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
