use serde::Serialize;

/// A fixed content category a subscriber can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub id: u32,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const TOPICS: [Topic; 8] = [
    Topic {
        id: 1,
        name: "Machine Learning",
        icon: "🧠",
        description: "ML algorithms, neural networks, and model developments",
    },
    Topic {
        id: 2,
        name: "Natural Language Processing",
        icon: "💬",
        description: "Language models, chatbots, and text analysis",
    },
    Topic {
        id: 3,
        name: "Computer Vision",
        icon: "👁️",
        description: "Image recognition, object detection, and visual AI",
    },
    Topic {
        id: 4,
        name: "AI Ethics & Safety",
        icon: "⚖️",
        description: "Responsible AI, bias prevention, and safety measures",
    },
    Topic {
        id: 5,
        name: "AI Tools & Frameworks",
        icon: "🛠️",
        description: "New AI tools, platforms, and development frameworks",
    },
    Topic {
        id: 6,
        name: "AI Startups & Business",
        icon: "🚀",
        description: "AI startup news, funding, and business applications",
    },
    Topic {
        id: 7,
        name: "Robotics & Automation",
        icon: "🤖",
        description: "Robotics advances and automation technologies",
    },
    Topic {
        id: 8,
        name: "AI Research & Papers",
        icon: "📚",
        description: "Latest research publications and scientific breakthroughs",
    },
];

pub const TIMEZONES: [&str; 9] = [
    "Asia/Kolkata",
    "America/New_York",
    "Europe/London",
    "America/Los_Angeles",
    "Europe/Berlin",
    "Asia/Tokyo",
    "Australia/Sydney",
    "America/Toronto",
    "Asia/Shanghai",
];

/// Static topic reference data, in display order.
pub struct TopicCatalog;

impl TopicCatalog {
    pub fn all() -> &'static [Topic] {
        &TOPICS
    }

    pub fn get(id: u32) -> Option<&'static Topic> {
        TOPICS.iter().find(|t| t.id == id)
    }

    pub fn contains(id: u32) -> bool {
        Self::get(id).is_some()
    }

    pub fn timezones() -> &'static [&'static str] {
        &TIMEZONES
    }

    pub fn is_offered_timezone(tz: &str) -> bool {
        TIMEZONES.contains(&tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_one_through_eight_in_order() {
        let ids: Vec<u32> = TopicCatalog::all().iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(TopicCatalog::get(3).unwrap().name, "Computer Vision");
        assert!(TopicCatalog::get(0).is_none());
        assert!(!TopicCatalog::contains(9));
    }

    #[test]
    fn test_timezones() {
        assert!(TopicCatalog::is_offered_timezone("Europe/Berlin"));
        assert!(!TopicCatalog::is_offered_timezone("Mars/Olympus_Mons"));
    }
}
