//! Status catalog: maps review status codes to the verdict shown to the user.

use relay_common::types::HomeworkStatus;

/// Look up a wire status code. Returns `None` for codes the API does not document.
pub fn lookup(code: &str) -> Option<HomeworkStatus> {
    HomeworkStatus::ALL
        .into_iter()
        .find(|status| status.code() == code)
}

/// Verdict sentence fragment for a status.
pub fn verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
        HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
        HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(lookup("approved"), Some(HomeworkStatus::Approved));
        assert_eq!(lookup("reviewing"), Some(HomeworkStatus::Reviewing));
        assert_eq!(lookup("rejected"), Some(HomeworkStatus::Rejected));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("Approved"), None);
        assert_eq!(lookup(" reviewing"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_verdicts_are_distinct() {
        let verdicts: Vec<_> = HomeworkStatus::ALL.into_iter().map(verdict).collect();
        assert_eq!(verdicts.len(), 3);
        assert_ne!(verdicts[0], verdicts[1]);
        assert_ne!(verdicts[1], verdicts[2]);
        assert_ne!(verdicts[0], verdicts[2]);
    }
}
