use crate::config::Settings;
use std::{
    io::{self, PipeReader},
    process::{Child, Command, Stdio},
};

/// Arguments for the long-lived renderer: raw PCM on stdin, out to the sink.
pub(crate) fn renderer_args(settings: &Settings) -> Vec<String> {
    let audio = &settings.audio;
    let renderer = &settings.renderer;

    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-ac".into(),
        audio.channels.to_string(),
        "-ar".into(),
        audio.sample_rate.to_string(),
        "-f".into(),
        audio.sample_format.clone(),
        "-i".into(),
        "-".into(),
        "-f".into(),
        renderer.sink.clone(),
        renderer.device.clone(),
    ]
}

pub(crate) fn spawn(settings: &Settings, input: PipeReader) -> io::Result<Child> {
    Command::new(&settings.renderer.program)
        .args(renderer_args(settings))
        .stdin(Stdio::from(input))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}
