//! Utility functions
use crate::errors::GitScoutError;
use crate::model::GitHubAccount;

/// Get a number from the user
pub(crate) fn input_number() -> Result<usize, GitScoutError> {
    loop {
        match input()?.parse::<usize>() {
            Ok(i) => return Ok(i),
            Err(_) => {
                println!("Invalid input");
            }
        }
    }
}

/// Get input from the user
pub(crate) fn input() -> Result<String, GitScoutError> {
    use std::io::{stdin, stdout, Write};
    let mut s = String::new();
    let _ = stdout().flush();
    stdin()
        .read_line(&mut s)
        .map_err(|e| GitScoutError::new_with_source("Did not enter a correct string", e))?;
    Ok(trim_newline(s))
}

/// Strip one trailing `\n` or `\r\n`
fn trim_newline(mut s: String) -> String {
    if let Some('\n') = s.chars().next_back() {
        s.pop();
    }
    if let Some('\r') = s.chars().next_back() {
        s.pop();
    }
    s
}

/// Parse a yes/no answer, `None` if it's neither
fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Get a yes/no input from the user
pub(crate) fn yes_no_input<S: AsRef<str>>(msg: S) -> Result<bool, GitScoutError> {
    let msg = msg.as_ref();
    loop {
        println!("{msg}");
        match parse_yes_no(&input()?) {
            Some(answer) => return Ok(answer),
            None => println!("Invalid input"),
        }
    }
}

/// Render a count, `-` when unknown
fn count(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// One line per repository, prefixed by `label`
pub(crate) fn summary_line(label: &str, account: &GitHubAccount) -> String {
    format!(
        "{label} {} [{}] ★ {} watchers {} forks {} issues {}",
        account.display_name(),
        account.language(),
        count(account.stargazers_count),
        count(account.watchers_count),
        count(account.forks_count),
        count(account.open_issues_count)
    )
}

/// Full details of a repository
pub(crate) fn details(account: &GitHubAccount) -> String {
    let mut lines = vec![account.display_name().to_string()];
    if let Some(id) = account.id {
        lines.push(format!("  id:          {id}"));
    }
    lines.push(format!("  language:    {}", account.language()));
    lines.push(format!("  stars:       {}", count(account.stargazers_count)));
    lines.push(format!("  watchers:    {}", count(account.watchers_count)));
    lines.push(format!("  forks:       {}", count(account.forks_count)));
    lines.push(format!("  open issues: {}", count(account.open_issues_count)));
    if let Some(owner) = &account.owner {
        lines.push(format!("  avatar:      {}", owner.avatar_url));
        if let Some(html_url) = &owner.html_url {
            lines.push(format!("  profile:     {html_url}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Owner;

    #[test]
    fn newline_is_trimmed() {
        assert_eq!(trim_newline("abc\r\n".to_string()), "abc");
        assert_eq!(trim_newline("abc\n".to_string()), "abc");
        assert_eq!(trim_newline("abc".to_string()), "abc");
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("yes "), Some(true));
        assert_eq!(parse_yes_no("No"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn details_show_fallbacks() {
        let account = GitHubAccount {
            id: Some(3),
            name: Some("Repository Name".to_string()),
            owner: Some(Owner {
                avatar_url: "https://a".to_string(),
                html_url: Some("https://b".to_string()),
            }),
            stargazers_count: Some(100),
            ..Default::default()
        };
        let text = details(&account);
        assert!(text.starts_with("Repository Name\n"));
        assert!(text.contains("id:          3"));
        assert!(text.contains("language:    No data"));
        assert!(text.contains("stars:       100"));
        assert!(text.contains("forks:       -"));
        assert!(text.contains("profile:     https://b"));
        assert_eq!(
            summary_line("[0]", &account),
            "[0] Repository Name [No data] ★ 100 watchers - forks - issues -"
        );
    }
}
