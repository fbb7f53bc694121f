use log::warn;
use shared::constants::{BET_SOUND_VOLUME, WIN_SOUND_VOLUME};
use shared::Sound;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

fn preload(sound: Sound) -> Option<HtmlAudioElement> {
    let audio = HtmlAudioElement::new_with_src(sound.asset_path()).ok()?;
    audio.set_preload("auto");
    Some(audio)
}

/// Preloaded sound effects. Each play clones the element so overlapping plays don't cut each other off.
pub struct SoundBoard {
    bet: Option<HtmlAudioElement>,
    win: Option<HtmlAudioElement>,
}

impl SoundBoard {
    pub fn load() -> Self {
        Self {
            bet: preload(Sound::Bet),
            win: preload(Sound::Win),
        }
    }

    pub fn play(&self, sound: Sound) {
        let (template, volume) = match sound {
            Sound::Bet => (self.bet.as_ref(), BET_SOUND_VOLUME),
            Sound::Win => (self.win.as_ref(), WIN_SOUND_VOLUME),
        };
        let Some(audio) = template
            .and_then(|template| template.clone_node().ok())
            .and_then(|node| node.dyn_into::<HtmlAudioElement>().ok())
        else {
            warn!("Sound {:?} is not loaded", sound);
            return;
        };

        audio.set_volume(volume);
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    warn!("Failed to play {:?}: {:?}", sound, e);
                }
            }),
            Err(e) => warn!("Failed to play {:?}: {:?}", sound, e),
        }
    }
}
