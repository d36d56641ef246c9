use serde::Serialize;
use uuid::Uuid;

const MAX_SUGGESTED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    #[serde(skip)]
    keywords: &'static [&'static str],
}

pub const FEATURES: &[Feature] = &[
    Feature {
        name: "Job Search",
        description: "Browse and filter open positions",
        path: "/jobs",
        keywords: &["job", "opening", "vacancy", "vacancies", "hiring", "position", "apply"],
    },
    Feature {
        name: "My Applications",
        description: "Track the status of jobs you applied to",
        path: "/applications",
        keywords: &["application", "applied", "status", "shortlist", "shortlisted"],
    },
    Feature {
        name: "Resume Builder",
        description: "Create a professional resume in minutes",
        path: "/resume-builder",
        keywords: &["resume", "cv", "biodata"],
    },
    Feature {
        name: "Courses",
        description: "Learn new skills with guided courses",
        path: "/courses",
        keywords: &[
            "course",
            "learn",
            "learning",
            "skill",
            "certificate",
            "certification",
            "training",
            "class",
            "classes",
        ],
    },
    Feature {
        name: "Profile",
        description: "Complete your profile to stand out to recruiters",
        path: "/profile",
        keywords: &["profile", "photo", "education", "experience"],
    },
    Feature {
        name: "Q&A",
        description: "Ask the community career questions",
        path: "/questions",
        keywords: &["question", "ask", "answer", "community"],
    },
    Feature {
        name: "Mock Interview",
        description: "Practise interview answers on video",
        path: "/interview",
        keywords: &["interview", "practice", "practise", "prepare"],
    },
];

pub const TIPS: &[&str] = &[
    "Profiles with a photo and skills get noticed by recruiters far more often.",
    "Tailor your resume summary to each job you apply for.",
    "Practise common interview questions out loud before the real thing.",
    "Finishing a course adds a new skill you can show on your profile.",
    "Check your applications page regularly to follow up on time.",
    "Use specific numbers in your resume to show the impact of your work.",
    "Ask questions in the Q&A section to learn from people already in the role.",
];

/// Features with a keyword among the words of `message`, in catalogue order.
/// A keyword matches a whole word or its plain plural.
pub fn features_for(message: &str) -> Vec<Feature> {
    let lower = message.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    FEATURES
        .iter()
        .filter(|f| {
            f.keywords
                .iter()
                .any(|k| words.iter().any(|w| keyword_matches(k, w)))
        })
        .take(MAX_SUGGESTED)
        .cloned()
        .collect()
}

fn keyword_matches(keyword: &str, word: &str) -> bool {
    word == keyword || word.strip_suffix('s') == Some(keyword)
}

pub fn random_tip() -> &'static str {
    TIPS[random_index(TIPS.len())]
}

pub fn random_feature() -> Feature {
    FEATURES[random_index(FEATURES.len())].clone()
}

fn random_index(len: usize) -> usize {
    (Uuid::new_v4().as_u128() % len as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_for_resume_question() {
        let found = features_for("How can I improve my Resume?");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "/resume-builder");
    }

    #[test]
    fn test_features_for_caps_results() {
        let found =
            features_for("job application resume course profile question interview");
        assert_eq!(found.len(), MAX_SUGGESTED);
        assert_eq!(found[0].name, "Job Search");
    }

    #[test]
    fn test_features_for_unrelated_message() {
        assert!(features_for("hello there").is_empty());
    }

    #[test]
    fn test_features_for_ignores_partial_words() {
        assert!(features_for("I finished a task on a classic car").is_empty());
        assert!(features_for("my jobless uncle").is_empty());
    }

    #[test]
    fn test_features_for_plurals() {
        let found = features_for("Any vacancies or courses?");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path, "/jobs");
        assert_eq!(found[1].path, "/courses");
    }

    #[test]
    fn test_random_tip_and_feature_come_from_catalogue() {
        for _ in 0..50 {
            assert!(TIPS.contains(&random_tip()));
            assert!(FEATURES.contains(&random_feature()));
        }
    }

    #[test]
    fn test_feature_serializes_without_keywords() {
        let value = serde_json::to_value(&FEATURES[0]).unwrap();
        assert_eq!(value["path"], "/jobs");
        assert!(value.get("keywords").is_none());
    }
}
