//! Closed topic and resource tables used for fallback sampling.

/// Topics and resources for one exam subject
#[derive(Debug)]
pub struct Catalog {
    pub subject: &'static str,
    pub topics: &'static [&'static str],
    pub resources: &'static [&'static str],
}

pub const MATH_TOPICS: &[&str] = &[
    "Algebraic expressions",
    "Linear equations",
    "Quadratic equations",
    "Systems of equations",
    "Inequalities",
    "Functions and graphs",
    "Derivatives",
    "Integrals",
    "Trigonometry",
    "Solid geometry",
    "Plane geometry",
    "Probability theory",
    "Statistics",
    "Word problems",
    "Economic problems",
    "Parameters",
];

pub const INFORMATICS_TOPICS: &[&str] = &[
    "Number systems",
    "Information encoding",
    "Modelling",
    "Algorithms and programming",
    "Databases",
    "Networks and the internet",
    "Logic and set theory",
    "Graphs and trees",
];

pub const LEARNING_RESOURCES: &[&str] = &[
    "Textbook: Algebra and elements of analysis",
    "Exam problem collection",
    "Online preparation course",
    "Video lessons on the topic",
    "Interactive drills",
    "Mock exam tests",
    "Methodological guides",
];

pub static MATHEMATICS: Catalog = Catalog {
    subject: "Mathematics",
    topics: MATH_TOPICS,
    resources: LEARNING_RESOURCES,
};

pub static INFORMATICS: Catalog = Catalog {
    subject: "Computer Science",
    topics: INFORMATICS_TOPICS,
    resources: LEARNING_RESOURCES,
};

/// Pick the catalog for a free-text subject label. Unknown subjects get Mathematics.
pub fn catalog_for_subject(subject: &str) -> &'static Catalog {
    let subject = subject.trim().to_lowercase();
    if subject.contains("informatic")
        || subject.contains("computer")
        || subject.contains("информатик")
    {
        &INFORMATICS
    } else {
        &MATHEMATICS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_lookup() {
        assert_eq!(catalog_for_subject("Computer Science").subject, "Computer Science");
        assert_eq!(catalog_for_subject(" informatics ").subject, "Computer Science");
        assert_eq!(catalog_for_subject("Mathematics").subject, "Mathematics");
        assert_eq!(catalog_for_subject("Physics").subject, "Mathematics");
    }

    #[test]
    fn catalogs_are_large_enough_for_fallbacks() {
        // fallback sampling asks for up to 4 distinct topics
        for catalog in [&MATHEMATICS, &INFORMATICS] {
            assert!(catalog.topics.len() >= 4);
            assert!(!catalog.resources.is_empty());
        }
    }
}
