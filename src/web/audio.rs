// Web Audio hit sounds. The AudioContext is created on the first hit (browsers
// only allow it after a user gesture anyway) and every failure degrades to
// silence.

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::sound::{SoundEmitter, ToneSpec, Waveform};
use crate::target::TargetKind;

pub struct WebAudioSound {
    ctx: Option<AudioContext>,
    unsupported: bool,
    // Rejection handler for `resume()`; one closure shared by every call.
    on_resume_rejected: Closure<dyn FnMut(JsValue)>,
}

impl Default for WebAudioSound {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSound {
    pub fn new() -> Self {
        let on_resume_rejected = Closure::wrap(Box::new(|e: JsValue| {
            console_log!("audio resume rejected: {e:?}");
        }) as Box<dyn FnMut(JsValue)>);
        Self { ctx: None, unsupported: false, on_resume_rejected }
    }

    fn ensure_context(&mut self) {
        if self.ctx.is_none() && !self.unsupported {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    self.unsupported = true;
                    console_warn!("audio unavailable, hits will be silent: {e:?}");
                }
            }
        }
    }
}

impl SoundEmitter for WebAudioSound {
    fn play(&mut self, kind: TargetKind) {
        self.ensure_context();
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };
        if ctx.state() == AudioContextState::Suspended {
            // Resolves asynchronously; a rejected resume just means no sound.
            match ctx.resume() {
                Ok(pending) => {
                    let _ = pending.catch(&self.on_resume_rejected);
                }
                Err(e) => console_log!("audio resume failed: {e:?}"),
            }
        }
        if let Err(e) = play_tone(ctx, ToneSpec::for_kind(kind)) {
            console_log!("tone skipped: {e:?}");
        }
    }
}

fn play_tone(ctx: &AudioContext, tone: ToneSpec) -> Result<(), JsValue> {
    let now = ctx.current_time();
    let end = now + tone.duration_secs;

    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    osc.set_type(match tone.waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
    });
    osc.frequency().set_value_at_time(tone.start_hz, now)?;
    osc.frequency().exponential_ramp_to_value_at_time(tone.end_hz, end)?;

    gain.gain().set_value_at_time(0.0001, now)?;
    gain.gain().linear_ramp_to_value_at_time(tone.peak_gain, now + tone.attack_secs)?;
    gain.gain().exponential_ramp_to_value_at_time(0.0001, end)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    osc.start()?;
    osc.stop_with_when(end + 0.01)?;
    Ok(())
}
