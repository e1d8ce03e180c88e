//! DMX payloads for the receiver's LED effects.
//!
//! Every payload starts with `shift` zero bytes (the receiver's DMX start
//! address), then an effect command byte and its arguments, zero-padded to a
//! full universe. Builders are pure: the caller owns the tick counter and any
//! randomness.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::color::{Rgb, hsv_to_rgb_bytes};
use crate::protocols::artnet::layout::DMX_MAX_SLOTS;

const CMD_STRAIGHT_DMX: u8 = 0x00;
const CMD_CHAIN: u8 = 0x01;
const CMD_CHAIN_REVERSED: u8 = 0x02;
const CMD_RAINBOW: u8 = 0x03;

const RAINBOW_ARGS_LEN: usize = 1 + 2 + 2 + 2 + 3 + 3 + 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EffectError {
    #[error("effect payload needs {needed} bytes but a universe holds {max}")]
    PayloadOverflow { needed: usize, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMode {
    /// Hue gradient along the strip, shifting one degree per tick.
    Default,
    /// Like `Default`, also sweeping saturation and value over time.
    FullRange,
    /// Hands the animation to the receiver's built-in rainbow.
    Rainbow,
    /// Pushes one colour into the receiver's chain effect.
    Chain,
    ChainReversed,
}

impl EffectMode {
    /// Send interval used when none is given.
    pub fn default_delay(self) -> Duration {
        match self {
            EffectMode::Rainbow => Duration::from_secs(5),
            EffectMode::Chain | EffectMode::ChainReversed => Duration::from_millis(400),
            EffectMode::Default | EffectMode::FullRange => Duration::from_millis(50),
        }
    }

    pub fn command(self) -> u8 {
        match self {
            EffectMode::Default | EffectMode::FullRange => CMD_STRAIGHT_DMX,
            EffectMode::Chain => CMD_CHAIN,
            EffectMode::ChainReversed => CMD_CHAIN_REVERSED,
            EffectMode::Rainbow => CMD_RAINBOW,
        }
    }
}

/// Arguments for the receiver-side rainbow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RainbowParams {
    /// Changing the id restarts the animation on the receiver.
    pub id: u8,
    /// Frame delay in milliseconds; the receiver rounds it to its ticks.
    pub delay_ms: u16,
    /// Hue increment per time step.
    pub time_step: u16,
    /// Hue increment per pixel.
    pub length_step: u16,
    pub start_color: Rgb,
    pub tint_color: Rgb,
    /// `final = color * (255 - weight) + tint * weight`
    pub tint_weight: u8,
}

impl Default for RainbowParams {
    fn default() -> Self {
        Self {
            id: 1,
            delay_ms: 0x50,
            time_step: 1,
            length_step: 1,
            start_color: [0x88, 0x00, 0x00],
            tint_color: [0x00, 0x00, 0x00],
            tint_weight: 0,
        }
    }
}

/// Immutable effect configuration, fixed for the lifetime of a send loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectConfig {
    pub mode: EffectMode,
    /// Leading zero bytes before the command byte.
    pub shift: usize,
    /// Number of RGB pixels on the strip.
    pub leds: usize,
    pub rainbow: RainbowParams,
}

impl EffectConfig {
    pub fn new(mode: EffectMode, shift: usize, leds: usize) -> Self {
        Self {
            mode,
            shift,
            leds,
            rainbow: RainbowParams::default(),
        }
    }

    /// Bytes used before zero padding.
    pub fn payload_len(&self) -> usize {
        let args = match self.mode {
            EffectMode::Default | EffectMode::FullRange => self.leds.saturating_mul(3),
            EffectMode::Chain | EffectMode::ChainReversed => 3,
            EffectMode::Rainbow => RAINBOW_ARGS_LEN,
        };
        self.shift.saturating_add(1).saturating_add(args)
    }

    /// Checks that every payload this configuration produces fits a universe.
    pub fn validate(&self) -> Result<(), EffectError> {
        let needed = self.payload_len();
        if needed > DMX_MAX_SLOTS {
            return Err(EffectError::PayloadOverflow {
                needed,
                max: DMX_MAX_SLOTS,
            });
        }
        Ok(())
    }
}

/// Colour of pixel `index` at `tick` for the straight-DMX modes.
///
/// Hue advances by `max(1, 360 / leds)` degrees per pixel and one degree per
/// tick. `FullRange` alternates between grey and full saturation every 120
/// ticks while value ramps 100 -> 0 -> 100 over 120 ticks. Other modes fall
/// back to the `Default` gradient.
pub fn pixel_color(mode: EffectMode, tick: u64, index: usize, leds: usize) -> Rgb {
    let step = (360.0 / leds.max(1) as f64).max(1.0);
    let hue = (tick as f64 + index as f64 * step) % 360.0;
    match mode {
        EffectMode::FullRange => {
            let saturation = if tick % 240 > 120 { 100.0 } else { 0.0 };
            let value = ((tick % 120) as f64 - 60.0).abs() / 0.6;
            hsv_to_rgb_bytes(hue, saturation, value)
        }
        _ => hsv_to_rgb_bytes(hue, 100.0, 50.0),
    }
}

/// Build the 512-byte DMX payload for `tick`.
///
/// `chain_hue` (degrees) is only used by the chain modes; callers usually
/// draw it at random for every frame.
pub fn build_payload(
    config: &EffectConfig,
    tick: u64,
    chain_hue: f64,
) -> Result<[u8; DMX_MAX_SLOTS], EffectError> {
    config.validate()?;

    let mut payload = [0u8; DMX_MAX_SLOTS];
    let mut pos = config.shift;
    let mut put = |bytes: &[u8]| {
        payload[pos..pos + bytes.len()].copy_from_slice(bytes);
        pos += bytes.len();
    };

    put(&[config.mode.command()]);
    match config.mode {
        EffectMode::Default | EffectMode::FullRange => {
            for index in 0..config.leds {
                put(&pixel_color(config.mode, tick, index, config.leds));
            }
        }
        EffectMode::Chain | EffectMode::ChainReversed => {
            put(&hsv_to_rgb_bytes(chain_hue, 100.0, 50.0));
        }
        EffectMode::Rainbow => {
            let r = &config.rainbow;
            put(&[r.id]);
            put(&r.delay_ms.to_be_bytes());
            put(&r.time_step.to_be_bytes());
            put(&r.length_step.to_be_bytes());
            put(&r.start_color);
            put(&r.tint_color);
            put(&[r.tint_weight]);
        }
    }

    Ok(payload)
}
