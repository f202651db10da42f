use std::process::{Command, Stdio};
use std::thread;

/// Pronounces a word. Fire-and-forget: callers never learn whether it worked.
pub trait Speaker {
    fn speak(&self, word: &str);
}

/// Runs an external text-to-speech program with the word as the last
/// argument, after `--`, and does not wait for it.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }

    fn command(&self, word: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--")
            .arg(word)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, word: &str) {
        match self.command(word).spawn() {
            Ok(mut child) => {
                log::debug!("speaking '{word}' via {} (pid {})", self.program, child.id());
                // Reap in the background.
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => log::warn!("could not run {} to speak '{word}': {e}", self.program),
        }
    }
}

pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, word: &str) {
        log::debug!("muted: not speaking '{word}'");
    }
}

pub fn default_speech_command() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak-ng".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_passed_after_configured_args() {
        let speaker = CommandSpeaker::new("espeak-ng", &["-s".to_string(), "140".to_string()]);
        let command = speaker.command("abate");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(command.get_program(), "espeak-ng");
        assert_eq!(args, ["-s", "140", "--", "abate"]);
    }

    #[test]
    fn leading_dash_word_is_not_an_option() {
        let speaker = CommandSpeaker::new("say", &[]);
        let command = speaker.command("-ish");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, ["--", "-ish"]);
    }

    #[test]
    fn missing_program_does_not_panic() {
        let speaker = CommandSpeaker::new("wordmem-no-such-tts-program", &[]);
        speaker.speak("abate");
    }
}
