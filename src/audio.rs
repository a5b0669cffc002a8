//! Audio using HTML media elements and the Web Audio API
//!
//! The laser is a sampled sound loaded at startup. When the sample cannot be
//! loaded in time, a synthesized laser is played instead.

use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, AudioContext, GainNode, HtmlAudioElement, OscillatorNode,
    OscillatorType,
};

use crate::error::GameError;
use crate::settings::Settings;

/// The laser sound source
#[derive(Debug, Clone)]
pub enum Sound {
    /// A loaded, playable sample
    Sample(HtmlAudioElement),
    /// Procedural fallback
    Synth,
}

/// Load a sound sample, resolving once it can play through
///
/// Fails with [`GameError::AssetLoadFailure`] when the element reports an
/// error or nothing arrives within `timeout_ms`.
pub async fn load_sound(url: &str, timeout_ms: u32) -> Result<Sound, GameError> {
    let failure = |reason: String| GameError::AssetLoadFailure {
        url: url.to_string(),
        reason,
    };

    let audio = HtmlAudioElement::new_with_src(url)
        .map_err(|e| failure(js_reason(&e, "could not create audio element")))?;

    let mut wire = |resolve: Function, reject: Function| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);

        let ready = Closure::once_into_js(move |_event: web_sys::Event| {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        let _ = audio.add_event_listener_with_callback_and_add_event_listener_options(
            "canplaythrough",
            ready.unchecked_ref(),
            &options,
        );

        let error_reject = reject.clone();
        let failed = Closure::once_into_js(move |_event: web_sys::Event| {
            let _ = error_reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("media error"));
        });
        let _ = audio.add_event_listener_with_callback_and_add_event_listener_options(
            "error",
            failed.unchecked_ref(),
            &options,
        );

        // Settling twice is harmless, so the timer is never cancelled
        if let Some(window) = web_sys::window() {
            let expired = Closure::once_into_js(move || {
                let _ = reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("timed out"));
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                expired.unchecked_ref(),
                timeout_ms.min(i32::MAX as u32) as i32,
            );
        }
    };
    let loaded = Promise::new(&mut wire);
    audio.load();

    JsFuture::from(loaded)
        .await
        .map_err(|e| failure(js_reason(&e, "unknown error")))?;

    log::info!("Loaded sound '{url}'");
    Ok(Sound::Sample(audio))
}

fn js_reason(value: &JsValue, fallback: &str) -> String {
    value.as_string().unwrap_or_else(|| fallback.to_string())
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sound: Sound,
    volume: f32,
}

impl AudioManager {
    /// Start with the synthesized laser until a sample is installed
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - synthesized sounds disabled");
        }
        Self {
            ctx,
            sound: Sound::Synth,
            volume: settings.effective_volume(),
        }
    }

    pub fn set_sound(&mut self, sound: Sound) {
        if let Sound::Sample(sample) = &sound {
            sample.set_volume(f64::from(self.volume));
        }
        self.sound = sound;
    }

    /// Play the laser, fire-and-forget
    pub fn play(&self) {
        if self.volume <= 0.0 {
            return;
        }

        match &self.sound {
            Sound::Sample(sample) => {
                // Rewind so rapid fire retriggers the sample
                sample.set_current_time(0.0);
                // The returned promise rejects until the page has had a user gesture
                let _ = sample.play();
            }
            Sound::Synth => self.play_synth_laser(),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Descending square-wave zap
    fn play_synth_laser(&self) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }
}
