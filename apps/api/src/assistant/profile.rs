use serde::Serialize;

use crate::assistant::guard::{sanitize, truncate_chars};
use crate::models::user::ProfileRow;

const MAX_SKILLS: usize = 8;
const MAX_SKILL_CHARS: usize = 40;
const MAX_NAME_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pronouns {
    HeHim,
    SheHer,
    TheyThem,
}

impl Pronouns {
    pub fn from_gender(gender: Option<&str>) -> Self {
        match gender.map(|g| g.trim().to_ascii_lowercase()).as_deref() {
            Some("male") | Some("m") | Some("man") => Pronouns::HeHim,
            Some("female") | Some("f") | Some("woman") => Pronouns::SheHer,
            _ => Pronouns::TheyThem,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pronouns::HeHim => "he/him",
            Pronouns::SheHer => "she/her",
            Pronouns::TheyThem => "they/them",
        }
    }
}

/// What the model is allowed to know about the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedProfile {
    pub first_name: String,
    pub role: String,
    pub skills: Vec<String>,
    pub completion_pct: u8,
    pub pronouns: Pronouns,
}

impl ScopedProfile {
    pub fn from_row(row: &ProfileRow) -> Self {
        let first_name = row
            .name
            .as_deref()
            .map(sanitize)
            .and_then(|n| n.split_whitespace().next().map(str::to_string))
            .map(|n| truncate_chars(&n, MAX_NAME_CHARS))
            .unwrap_or_else(|| "there".to_string());

        let skills = row
            .skills
            .iter()
            .map(|s| truncate_chars(&sanitize(s), MAX_SKILL_CHARS))
            .filter(|s| !s.is_empty())
            .take(MAX_SKILLS)
            .collect();

        Self {
            first_name,
            role: sanitize(&row.role).to_ascii_lowercase(),
            skills,
            completion_pct: completion_percentage(row),
            pronouns: Pronouns::from_gender(row.gender.as_deref()),
        }
    }
}

/// Share of the ten profile fields that are filled in, 0–100.
pub fn completion_percentage(row: &ProfileRow) -> u8 {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    let checks = [
        filled(&row.name),
        filled(&row.email),
        filled(&row.phone),
        filled(&row.location),
        filled(&row.bio),
        !row.skills.is_empty(),
        filled(&row.education),
        filled(&row.experience),
        filled(&row.resume_url),
        filled(&row.image),
    ];

    let done = checks.iter().filter(|c| **c).count();
    ((done * 100) as f64 / checks.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row() -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            role: "USER".to_string(),
            ..Default::default()
        }
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_empty_profile_is_zero_percent() {
        assert_eq!(completion_percentage(&row()), 0);
    }

    #[test]
    fn test_full_profile_is_hundred_percent() {
        let r = ProfileRow {
            name: some("Asha Verma"),
            email: some("asha@example.com"),
            phone: some("9999999999"),
            location: some("Pune"),
            bio: some("Backend engineer"),
            skills: vec!["Rust".to_string()],
            education: some("B.Tech"),
            experience: some("3 years"),
            resume_url: some("https://cdn.example.com/r.pdf"),
            image: some("https://cdn.example.com/a.png"),
            ..row()
        };
        assert_eq!(completion_percentage(&r), 100);
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let r = ProfileRow {
            name: some("Asha"),
            bio: some("   "),
            location: some(""),
            skills: vec!["SQL".to_string()],
            ..row()
        };
        assert_eq!(completion_percentage(&r), 20);
    }

    #[test]
    fn test_pronouns_from_gender() {
        assert_eq!(Pronouns::from_gender(Some("Male")), Pronouns::HeHim);
        assert_eq!(Pronouns::from_gender(Some(" FEMALE ")), Pronouns::SheHer);
        assert_eq!(Pronouns::from_gender(Some("non-binary")), Pronouns::TheyThem);
        assert_eq!(Pronouns::from_gender(None), Pronouns::TheyThem);
        assert_eq!(Pronouns::TheyThem.as_str(), "they/them");
    }

    #[test]
    fn test_scoped_profile_uses_first_name_only() {
        let r = ProfileRow {
            name: some("Asha  Verma"),
            ..row()
        };
        assert_eq!(ScopedProfile::from_row(&r).first_name, "Asha");
    }

    #[test]
    fn test_scoped_profile_without_name() {
        assert_eq!(ScopedProfile::from_row(&row()).first_name, "there");
    }

    #[test]
    fn test_scoped_profile_limits_skills() {
        let r = ProfileRow {
            skills: (0..12)
                .map(|i| format!("skill-{i}"))
                .chain(std::iter::once("x".repeat(100)))
                .collect(),
            ..row()
        };
        let scoped = ScopedProfile::from_row(&r);
        assert_eq!(scoped.skills.len(), MAX_SKILLS);
        assert_eq!(scoped.skills[0], "skill-0");
    }

    #[test]
    fn test_scoped_profile_truncates_long_skill() {
        let r = ProfileRow {
            skills: vec!["y".repeat(100), "\n".to_string()],
            ..row()
        };
        let scoped = ScopedProfile::from_row(&r);
        assert_eq!(scoped.skills, vec!["y".repeat(MAX_SKILL_CHARS)]);
    }

    #[test]
    fn test_scoped_profile_normalizes_role() {
        let r = ProfileRow {
            role: "RECRUITER".to_string(),
            gender: some("female"),
            ..row()
        };
        let scoped = ScopedProfile::from_row(&r);
        assert_eq!(scoped.role, "recruiter");
        assert_eq!(scoped.pronouns, Pronouns::SheHer);
    }
}
