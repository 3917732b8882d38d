//! Feed cards: brain facts, quiz prompts and challenge suggestions.
//!
//! Like the exercise generators, card generation is pure and draws every
//! choice from the caller's rng, so a seeded rng yields the same feed.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shown for topics with no facts of their own.
pub const FALLBACK_FACT: &str = "Did you know? The brain never stops learning.";

const QUIZZES: [&str; 3] = [
    "What percentage of your brain's energy does glucose consumption account for?",
    "How many hours of sleep are recommended for optimal cognitive function?",
    "What is the average attention span of an adult?",
];

const CHALLENGES: [&str; 3] = [
    "Complete a memory game in under 2 minutes",
    "Maintain focus on a single task for 25 minutes",
    "Solve three logic puzzles consecutively",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Fact,
    Quiz,
    Challenge,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Fact, FeedKind::Quiz, FeedKind::Challenge];
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Fact => write!(f, "fact"),
            FeedKind::Quiz => write!(f, "quiz"),
            FeedKind::Challenge => write!(f, "challenge"),
        }
    }
}

impl FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fact" => Ok(FeedKind::Fact),
            "quiz" => Ok(FeedKind::Quiz),
            "challenge" => Ok(FeedKind::Challenge),
            other => Err(format!("unknown feed kind: {other}")),
        }
    }
}

/// Subject a feed card is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Memory,
    Focus,
    ProblemSolving,
    Creativity,
    Logic,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Memory,
        Topic::Focus,
        Topic::ProblemSolving,
        Topic::Creativity,
        Topic::Logic,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Topic::Memory => "Memory",
            Topic::Focus => "Focus",
            Topic::ProblemSolving => "Problem-Solving",
            Topic::Creativity => "Creativity",
            Topic::Logic => "Logic",
        }
    }

    /// Facts about this topic. Empty for creativity and logic.
    pub fn facts(self) -> &'static [&'static str] {
        match self {
            Topic::Memory => &[
                "The human brain can store approximately 2.5 petabytes of information",
                "Sleep is crucial for memory consolidation and learning",
                "The hippocampus plays a key role in forming new memories",
            ],
            Topic::Focus => &[
                "The average attention span is about 8 seconds",
                "Multitasking can reduce productivity by up to 40%",
                "Regular meditation can improve focus and concentration",
            ],
            Topic::ProblemSolving => &[
                "Taking breaks can improve problem-solving abilities",
                "The brain uses about 20% of the body's energy",
                "Creative thinking activates multiple brain regions",
            ],
            Topic::Creativity | Topic::Logic => &[],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Memory => write!(f, "memory"),
            Topic::Focus => write!(f, "focus"),
            Topic::ProblemSolving => write!(f, "problem-solving"),
            Topic::Creativity => write!(f, "creativity"),
            Topic::Logic => write!(f, "logic"),
        }
    }
}

/// One card in the content feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub kind: FeedKind,
    pub topic: Topic,
    pub title: String,
    pub content: String,
    /// Label shown on the card: the topic for facts, else the card kind.
    pub category: String,
    /// Text for the card's detail view.
    pub details: String,
}

/// A card of uniformly drawn kind and topic.
pub fn generate_feed_item<R: Rng + ?Sized>(rng: &mut R) -> FeedItem {
    let kind = FeedKind::ALL[rng.gen_range(0..FeedKind::ALL.len())];
    let topic = Topic::ALL[rng.gen_range(0..Topic::ALL.len())];
    feed_item(kind, topic, rng)
}

/// A card of the given kind and topic; only the content line is drawn.
///
/// Quiz and challenge prompts are shared across topics.
pub fn feed_item<R: Rng + ?Sized>(kind: FeedKind, topic: Topic, rng: &mut R) -> FeedItem {
    let (title, content, category, details) = match kind {
        FeedKind::Fact => (
            "Brain Fact",
            topic.facts().choose(rng).copied().unwrap_or(FALLBACK_FACT),
            topic.title().to_string(),
            format!("Learn more about {topic} and how it affects your cognitive abilities."),
        ),
        FeedKind::Quiz => (
            "Brain Quiz",
            QUIZZES[rng.gen_range(0..QUIZZES.len())],
            "Quiz".to_string(),
            "Answer to earn points and unlock achievements!".to_string(),
        ),
        FeedKind::Challenge => (
            "Daily Challenge",
            CHALLENGES[rng.gen_range(0..CHALLENGES.len())],
            "Challenge".to_string(),
            "Complete this challenge to earn bonus points!".to_string(),
        ),
    };

    FeedItem {
        kind,
        topic,
        title: title.to_string(),
        content: content.to_string(),
        category,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn fact_cards_use_the_topic() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let item = feed_item(FeedKind::Fact, Topic::ProblemSolving, &mut rng);
        assert_eq!(item.title, "Brain Fact");
        assert_eq!(item.category, "Problem-Solving");
        assert!(Topic::ProblemSolving.facts().contains(&item.content.as_str()));
        assert_eq!(
            item.details,
            "Learn more about problem-solving and how it affects your cognitive abilities."
        );
    }

    #[test]
    fn topics_without_facts_fall_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for topic in [Topic::Creativity, Topic::Logic] {
            let item = feed_item(FeedKind::Fact, topic, &mut rng);
            assert_eq!(item.content, FALLBACK_FACT);
            assert_eq!(item.category, topic.title());
        }
    }

    #[test]
    fn quiz_and_challenge_cards_share_prompts_across_topics() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let quiz = feed_item(FeedKind::Quiz, Topic::Logic, &mut rng);
        assert_eq!(quiz.title, "Brain Quiz");
        assert_eq!(quiz.category, "Quiz");
        assert!(QUIZZES.contains(&quiz.content.as_str()));

        let challenge = feed_item(FeedKind::Challenge, Topic::Memory, &mut rng);
        assert_eq!(challenge.title, "Daily Challenge");
        assert_eq!(challenge.category, "Challenge");
        assert!(CHALLENGES.contains(&challenge.content.as_str()));
    }

    #[test]
    fn random_cards_cover_every_kind_and_topic() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let items: Vec<_> = (0..300).map(|_| generate_feed_item(&mut rng)).collect();
        let kinds: HashSet<_> = items.iter().map(|i| i.kind).collect();
        let topics: HashSet<_> = items.iter().map(|i| i.topic).collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(topics.len(), 5);
    }

    #[test]
    fn seeded_feed_is_reproducible() {
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..5).map(|_| generate_feed_item(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(33), draw(33));
    }

    #[test]
    fn kind_parses() {
        assert_eq!("Quiz".parse::<FeedKind>(), Ok(FeedKind::Quiz));
        assert!("poll".parse::<FeedKind>().is_err());
    }
}
