use crate::error::{InstallerError, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// True when the first non-whitespace character is `y` or `Y`. Empty input
/// means "no".
pub fn parse_confirmation(response: &str) -> bool {
    matches!(response.trim_start().chars().next(), Some('y' | 'Y'))
}

/// Install locations offered by the destination menu.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationPresets {
    pub current_dir: PathBuf,
    pub system_dir: PathBuf,
    pub documents_dir: PathBuf,
}

impl DestinationPresets {
    /// Presets for this machine. Falls back to the current directory when
    /// the platform has no documents folder.
    pub fn detect(system_dir: PathBuf, folder: &str) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .map(|docs| docs.join(folder))
            .unwrap_or_else(|| current_dir.clone());

        Ok(Self {
            current_dir,
            system_dir,
            documents_dir,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationChoice {
    CurrentDirectory,
    SystemDirectory,
    Documents,
    Custom,
    /// Anything unrecognized; treated like `CurrentDirectory`.
    Invalid,
}

impl DestinationChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => DestinationChoice::CurrentDirectory,
            "2" => DestinationChoice::SystemDirectory,
            "3" => DestinationChoice::Documents,
            "4" => DestinationChoice::Custom,
            _ => DestinationChoice::Invalid,
        }
    }
}

/// The interactive questions the installer asks.
pub trait Prompter {
    fn confirm(&mut self, message: &str) -> Result<bool>;

    fn choose_destination(&mut self, presets: &DestinationPresets) -> Result<PathBuf>;
}

/// Prompts on any line-based input/output pair, normally stdin/stdout.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line without its line ending. End of input reads as empty;
    /// bytes that are not UTF-8 are replaced rather than rejected.
    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut buf = Vec::new();
        self.input
            .read_until(b'\n', &mut buf)
            .map_err(|e| InstallerError::prompt_error(format!("failed to read input: {e}")))?;
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.output, "{message} (Y/N): ")?;
        let response = self.read_line()?;
        log::info!("User prompt: {message} - Response: {response}");
        Ok(parse_confirmation(&response))
    }

    fn choose_destination(&mut self, presets: &DestinationPresets) -> Result<PathBuf> {
        writeln!(self.output)?;
        writeln!(self.output, "Select installation location:")?;
        writeln!(self.output, "  1. Current directory")?;
        writeln!(self.output, "  2. {}", presets.system_dir.display())?;
        writeln!(self.output, "  3. User Documents folder")?;
        writeln!(self.output, "  4. Custom path")?;
        writeln!(self.output)?;
        write!(self.output, "Enter choice (1-4): ")?;

        let path = match DestinationChoice::parse(&self.read_line()?) {
            DestinationChoice::CurrentDirectory => {
                log::info!("Install path: Current directory - {}", presets.current_dir.display());
                presets.current_dir.clone()
            }
            DestinationChoice::SystemDirectory => {
                log::info!("Install path: System directory - {}", presets.system_dir.display());
                presets.system_dir.clone()
            }
            DestinationChoice::Documents => {
                log::info!("Install path: Documents - {}", presets.documents_dir.display());
                presets.documents_dir.clone()
            }
            DestinationChoice::Custom => {
                write!(self.output, "Enter custom installation path: ")?;
                let custom = self.read_line()?;
                log::info!("Install path: Custom - {custom}");
                PathBuf::from(custom)
            }
            DestinationChoice::Invalid => {
                writeln!(self.output, "ℹ️  Invalid choice, using current directory")?;
                log::info!(
                    "Install path: Default (current directory) - {}",
                    presets.current_dir.display()
                );
                presets.current_dir.clone()
            }
        };

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn presets() -> DestinationPresets {
        DestinationPresets {
            current_dir: PathBuf::from("/work"),
            system_dir: PathBuf::from("/opt/termUI"),
            documents_dir: PathBuf::from("/home/user/Documents/termUI"),
        }
    }

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(!parse_confirmation(""));
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("Y"));
        assert!(parse_confirmation("yes"));
        assert!(parse_confirmation("  y"));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("x"));
        assert!(!parse_confirmation("   "));
    }

    #[test]
    fn test_confirm_reads_one_line() {
        let mut p = prompter("yes\nno\n");
        assert!(p.confirm("Install?").unwrap());
        assert!(!p.confirm("Install?").unwrap());

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output, "Install? (Y/N): Install? (Y/N): ");
    }

    #[test]
    fn test_confirm_empty_and_eof_mean_no() {
        let mut p = prompter("\n");
        assert!(!p.confirm("Install?").unwrap());
        assert!(!p.confirm("Install?").unwrap());
    }

    #[test]
    fn test_confirm_handles_crlf() {
        let mut p = prompter("Y\r\n");
        assert!(p.confirm("Install?").unwrap());
    }

    #[test]
    fn test_invalid_utf8_input_is_not_an_error() {
        let bytes = |raw: &[u8]| {
            ConsolePrompter::new(Cursor::new(raw.to_vec()), Vec::new())
        };

        assert!(!bytes(&[0xff, b'\n']).confirm("Install?").unwrap());
        assert!(!bytes(&[0xff, b'y', b'\n']).confirm("Install?").unwrap());
        assert!(bytes(&[b'y', 0xff, b'\n']).confirm("Install?").unwrap());
        assert_eq!(
            bytes(&[0xff, b'\n']).choose_destination(&presets()).unwrap(),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_read_failure_is_prompt_error() {
        struct BrokenInput;

        impl std::io::Read for BrokenInput {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("console closed"))
            }
        }

        let input = std::io::BufReader::new(BrokenInput);
        let mut p = ConsolePrompter::new(input, Vec::new());
        assert!(matches!(
            p.confirm("Install?"),
            Err(InstallerError::PromptError { .. })
        ));
    }

    #[test]
    fn test_destination_presets() {
        assert_eq!(
            prompter("1\n").choose_destination(&presets()).unwrap(),
            PathBuf::from("/work")
        );
        assert_eq!(
            prompter("2\n").choose_destination(&presets()).unwrap(),
            PathBuf::from("/opt/termUI")
        );
        assert_eq!(
            prompter("3\n").choose_destination(&presets()).unwrap(),
            PathBuf::from("/home/user/Documents/termUI")
        );
    }

    #[test]
    fn test_destination_custom_is_verbatim() {
        let mut p = prompter("4\n  /srv/my apps \n");
        assert_eq!(
            p.choose_destination(&presets()).unwrap(),
            PathBuf::from("  /srv/my apps ")
        );
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Enter custom installation path: "));
    }

    #[test]
    fn test_destination_invalid_falls_back_to_current_dir() {
        let mut p = prompter("9\n");
        assert_eq!(
            p.choose_destination(&presets()).unwrap(),
            PathBuf::from("/work")
        );
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Invalid choice, using current directory"));

        assert_eq!(
            prompter("").choose_destination(&presets()).unwrap(),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(DestinationChoice::parse(" 2 "), DestinationChoice::SystemDirectory);
        assert_eq!(DestinationChoice::parse("4"), DestinationChoice::Custom);
        assert_eq!(DestinationChoice::parse("12"), DestinationChoice::Invalid);
    }
}
