//! Account commands: `keyinfo` and `init`.

use super::{build_client, load_config, CliError};
use agent_console::config::{api_key, default, xdg};
use agent_console::format::timestamp;
use cursor_agents::ApiKeyInfo;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// `bac keyinfo`: details about the API key in use.
pub(crate) fn run_keyinfo_command(
    api_key_flag: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let (_, client) = super::connect(api_key_flag, config_path)?;
    let info = client.api_key_info()?;
    write_key_info(&mut io::stdout().lock(), &info)?;
    Ok(())
}

fn write_key_info(out: &mut impl Write, info: &ApiKeyInfo) -> io::Result<()> {
    writeln!(out, "API Key")?;
    writeln!(out, "  Name:     {}", info.name)?;
    writeln!(out, "  Created:  {}", timestamp(&info.created_at))?;
    if !info.user_email.is_empty() {
        writeln!(out, "  Owner:    {}", info.user_email)?;
    }
    Ok(())
}

/// `bac init`: asks for an API key, checks it against the API and saves it.
///
/// `--api-key` skips the prompt.
pub(crate) fn run_init_command(
    api_key_flag: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let path = config_path.map_or_else(xdg::config_path, Path::to_path_buf);
    // A missing file is fine here; a broken one is not.
    let config = if path.exists() {
        load_config(Some(&path))?
    } else {
        Default::default()
    };

    let key = match api_key_flag.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => prompt_api_key(&mut io::stdin().lock(), &mut io::stderr())?,
    };

    let client = build_client(&config, &key)?;
    let info = client.api_key_info()?;
    tracing::info!(key = %api_key::mask(&key), "API key accepted");

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        xdg::ensure_dir(parent)?;
    }
    default::save_api_key(&path, &key)?;
    println!("API key \"{}\" saved to {}", info.name, path.display());
    Ok(())
}

fn prompt_api_key(input: &mut impl BufRead, prompt: &mut impl Write) -> Result<String, CliError> {
    write!(prompt, "Enter your Cursor API key: ")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = line.trim();
    if key.is_empty() {
        return Err(CliError::Usage("no API key entered".to_string()));
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_prompt_reads_trimmed_key() {
        let mut input = io::Cursor::new(b"  key_abc  \n".to_vec());
        let mut prompt = Vec::new();
        let key = prompt_api_key(&mut input, &mut prompt).expect("key");
        assert_eq!(key, "key_abc");
        assert!(String::from_utf8_lossy(&prompt).contains("API key"));
    }

    #[test]
    fn test_prompt_rejects_blank_input() {
        let mut input = io::Cursor::new(b"\n".to_vec());
        let mut prompt = Vec::new();
        let err = prompt_api_key(&mut input, &mut prompt).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_key_info_output() {
        let info = ApiKeyInfo {
            id: "k1".to_string(),
            name: "laptop".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            user_email: "dev@example.com".to_string(),
        };
        let mut out = Vec::new();
        write_key_info(&mut out, &info).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Name:     laptop"));
        assert!(out.contains("Created:  2024-03-01 09:00"));
        assert!(out.contains("Owner:    dev@example.com"));
    }
}
