//! Line-oriented command parsing for the terminal front end.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Reload,
    /// Catalog identifier or 1-based position in the listed candidates.
    Select(String),
    /// `None` clears the chosen file.
    ChooseFile(Option<PathBuf>),
    Upload,
    AppendJobDescription(String),
    LoadJobDescription(PathBuf),
    ClearJobDescription,
    Analyze,
    SaveReport(PathBuf),
    Dismiss,
    Help,
    Quit,
    /// Anything unrecognised or missing a required argument.
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  list | reload      fetch the candidate list again
  select <id|n>      pick a candidate by name or list position
  file <path>        choose a resume file to upload (no path clears it)
  upload             upload the chosen file
  jd <text>          append a line to the job description
  jd-file <path>     replace the job description with a file's contents
  jd-clear           clear the job description
  analyze            compare the selected candidate with the job description
  save <path>        write the current result as an HTML report
  ok | <Enter>       dismiss the current message
  help               show this list
  quit               exit";

pub fn parse_command(line: &str) -> UserCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    match word.to_ascii_lowercase().as_str() {
        "" | "ok" => UserCommand::Dismiss,
        "list" | "reload" => UserCommand::Reload,
        "select" if arg.is_empty() => UserCommand::Invalid("select needs a candidate".to_string()),
        "select" => UserCommand::Select(arg.to_string()),
        "file" if arg.is_empty() => UserCommand::ChooseFile(None),
        "file" => UserCommand::ChooseFile(Some(PathBuf::from(arg))),
        "upload" => UserCommand::Upload,
        // Indentation after the separator is part of the line.
        "jd" => UserCommand::AppendJobDescription(rest.to_string()),
        "jd-file" if arg.is_empty() => UserCommand::Invalid("jd-file needs a path".to_string()),
        "jd-file" => UserCommand::LoadJobDescription(PathBuf::from(arg)),
        "jd-clear" => UserCommand::ClearJobDescription,
        "analyze" => UserCommand::Analyze,
        "save" if arg.is_empty() => UserCommand::Invalid("save needs a path".to_string()),
        "save" => UserCommand::SaveReport(PathBuf::from(arg)),
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" => UserCommand::Quit,
        other => UserCommand::Invalid(format!("unknown command '{other}'")),
    }
}
