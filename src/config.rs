use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Contents of `config.toml`. Every field has a default, so the file is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub audio: AudioFormat,
    pub decoder: DecoderSettings,
    pub renderer: RendererSettings,
}

/// Raw PCM format shared by the decoder's output and the renderer's input.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_format: String,
}

impl Default for AudioFormat {
    fn default() -> Self {
        AudioFormat {
            sample_rate: 44_100,
            channels: 2,
            sample_format: String::from("f32le"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderSettings {
    pub program: String,
    pub volume: f32,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        DecoderSettings {
            program: String::from("ffmpeg"),
            volume: 0.75,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RendererSettings {
    pub program: String,
    pub sink: String,
    pub device: String,
}

impl Default for RendererSettings {
    fn default() -> Self {
        RendererSettings {
            program: String::from("ffmpeg"),
            sink: String::from("pulse"),
            device: String::from("default"),
        }
    }
}

impl Settings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&file_str)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match path.as_ref().exists() {
            true => Self::load_from_file(path),
            false => Ok(Settings::default()),
        }
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let settings = toml::from_str::<Settings>(s)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.audio.channels == 0 {
            bail!("audio.channels must be at least 1");
        }
        if self.audio.sample_rate == 0 {
            bail!("audio.sample_rate must be positive");
        }
        if !self.decoder.volume.is_finite() || self.decoder.volume < 0.0 {
            bail!("decoder.volume must be a non-negative number");
        }
        if self.decoder.program.is_empty() || self.renderer.program.is_empty() {
            bail!("decoder.program and renderer.program cannot be empty");
        }
        Ok(())
    }
}
