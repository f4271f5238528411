//! Adaptive smoothing and change detection for noisy analog axes.
//!
//! Converts a raw integer sample stream (potentiometer, slider, any ADC
//! source) into a stable normalized value and decides when that value has
//! changed enough to act on. Single-threaded, no allocation, no OS
//! services; suitable for firmware control loops.
//!
//! The one knob that matters is `settle_time_sec`: how long the output
//! takes to cover ~95% of a step change. Everything else — the EMA decay
//! rate, the noise-adaptive change threshold — is derived from it.
//!
//! ```
//! use smooth_axis::{Config, SmoothAxis};
//!
//! let mut axis = SmoothAxis::new(Config::live_dt(1023_u16, 0.25)).unwrap();
//!
//! // once per control-loop iteration:
//! let raw = 700_u16; // read_adc()
//! axis.update_live(raw, 0.016);
//! if axis.has_new_value() {
//!     let _value = axis.quantized(); // 0..=1023
//! }
//! ```
//!
//! For loops with a stable rate, auto-dt mode measures the loop interval
//! itself from an injected millisecond clock:
//!
//! ```
//! use smooth_axis::{Config, SmoothAxis};
//!
//! let mut now = 0_u32;
//! let clock = move || {
//!     now += 16; // timer_read32() / millis()
//!     now
//! };
//! let mut axis = SmoothAxis::new(Config::auto_dt(1023_u16, 0.25, clock)).unwrap();
//! axis.update_auto(700);
//! ```

#![no_std]

mod axis;
mod config;
mod contract;
mod normalize;
mod threshold;
mod warmup;

pub mod ema;
pub mod noise;
pub mod sticky;

pub use axis::SmoothAxis;
pub use config::{Clock, Config, ConfigError, DtMode};
pub use ema::Ema;
pub use noise::NoiseTracker;
