use crate::{config::Settings, domain::Track};
use std::{
    ffi::OsString,
    io::{self, PipeWriter},
    process::{Child, Command, Stdio},
};

/// Arguments decoding one track to raw PCM on stdout.
pub(crate) fn decoder_args(settings: &Settings, track: &Track, seek_secs: Option<u64>) -> Vec<OsString> {
    let audio = &settings.audio;
    let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-loglevel".into(), "error".into(), "-nostdin".into()];

    if let Some(secs) = seek_secs {
        args.push("-ss".into());
        args.push(secs.to_string().into());
    }

    args.push("-i".into());
    args.push(track.path().as_os_str().to_owned());
    args.extend(
        [
            "-af".to_string(),
            format!("volume={}", settings.decoder.volume),
            "-ac".into(),
            audio.channels.to_string(),
            "-ar".into(),
            audio.sample_rate.to_string(),
            "-f".into(),
            audio.sample_format.clone(),
            "-".into(),
        ]
        .map(OsString::from),
    );

    args
}

pub(crate) fn spawn(
    settings: &Settings,
    track: &Track,
    seek_secs: Option<u64>,
    output: PipeWriter,
) -> io::Result<Child> {
    Command::new(&settings.decoder.program)
        .args(decoder_args(settings, track, seek_secs))
        .stdin(Stdio::null())
        .stdout(Stdio::from(output))
        .stderr(Stdio::null())
        .spawn()
}
