use crate::detect::types::Candidate;

/// Default first line of every notification
pub const DEFAULT_HEADER: &str = "📢 새 업데이트 공지가 올라왔습니다!";

/// Build the message for `candidate`: header, optional version line, label and URL.
pub fn compose_message(header: &str, candidate: &Candidate) -> String {
    let mut lines = vec![header.to_string()];
    if let Some(version) = &candidate.version {
        lines.push(format!("버전: {version}"));
    }
    lines.push(candidate.label.clone());
    lines.push(candidate.url.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_message_includes_version_line_when_known() {
        let candidate = Candidate {
            url: "https://game.example.com/news/42".to_string(),
            version: Some("1.021.01.00".to_string()),
            label: "Ver.1.021.01.00 업데이트 안내".to_string(),
        };

        assert_eq!(
            compose_message("New update", &candidate),
            "New update\n버전: 1.021.01.00\nVer.1.021.01.00 업데이트 안내\nhttps://game.example.com/news/42"
        );
    }

    #[test]
    fn compose_message_omits_version_line_when_unknown() {
        let candidate = Candidate {
            url: "https://game.example.com/news/42".to_string(),
            version: None,
            label: "https://game.example.com/news/42".to_string(),
        };

        assert_eq!(
            compose_message(DEFAULT_HEADER, &candidate),
            format!("{DEFAULT_HEADER}\nhttps://game.example.com/news/42\nhttps://game.example.com/news/42")
        );
    }
}
