pub mod body_state;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod easing;
pub mod logging;
pub mod navigation;
pub mod pin;
pub mod reveal;
pub mod scramble;
pub mod session;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
