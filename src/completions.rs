use std::io::{self, Write};
use std::path::PathBuf;

use clap_complete::{generate, Shell};

pub fn generate_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = crate::cli::styled_command();
    generate(shell, &mut cmd, "fpt", buf);
}

pub fn detect_current_shell() -> Option<Shell> {
    let shell_var = std::env::var("SHELL").ok()?;
    let basename = shell_var.rsplit('/').next()?;
    match basename {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        _ => None,
    }
}

fn completions_install_path_for_home(shell: Shell, home: &std::path::Path) -> Option<PathBuf> {
    match shell {
        Shell::Bash => {
            let dir = home.join(".local/share/bash-completion/completions");
            Some(dir.join("fpt"))
        }
        Shell::Zsh => {
            let dir = home.join(".config/footprint/completions");
            Some(dir.join("fpt.zsh"))
        }
        Shell::Fish => {
            let dir = home.join(".config/fish/completions");
            Some(dir.join("fpt.fish"))
        }
        _ => None,
    }
}

pub fn install_completions(shell: Shell) -> io::Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let home = PathBuf::from(home);

    let path = completions_install_path_for_home(shell, &home).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no install path for {shell:?}"),
        )
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(&path)?;
    generate_completions(shell, &mut file);
    Ok(path)
}

pub fn parse_shell(raw: &str) -> Option<Shell> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use clap_complete::Shell;

    use super::{completions_install_path_for_home, generate_completions, parse_shell};

    #[test]
    fn generated_bash_completions_mention_the_binary() {
        let mut buf = Vec::new();
        generate_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).expect("completions should be utf8");
        assert!(script.contains("fpt"));
    }

    #[test]
    fn install_paths_follow_shell_conventions() {
        let home = std::path::Path::new("/home/sam");
        let bash = completions_install_path_for_home(Shell::Bash, home)
            .expect("bash path should exist");
        assert!(bash.ends_with(".local/share/bash-completion/completions/fpt"));
        assert!(completions_install_path_for_home(Shell::PowerShell, home).is_none());
    }

    #[test]
    fn shell_names_parse_case_insensitively() {
        assert_eq!(parse_shell("Bash"), Some(Shell::Bash));
        assert_eq!(parse_shell("ZSH"), Some(Shell::Zsh));
        assert_eq!(parse_shell("tcsh"), None);
    }
}
