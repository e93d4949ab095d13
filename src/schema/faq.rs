use maud::{html, Markup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{json_ld_script, SchemaNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

pub fn faq_schema(faqs: &[FaqItem]) -> Value {
    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            SchemaNode::typed("Question")
                .field("name", faq.question.as_str())
                .node(
                    "acceptedAnswer",
                    SchemaNode::typed("Answer").field("text", faq.answer.as_str()),
                )
                .into_value()
        })
        .collect();

    SchemaNode::root("FAQPage").field("mainEntity", questions).into_value()
}

/// FAQ rich-result script; renders nothing when there are no questions.
pub fn faq_script(faqs: &[FaqItem]) -> Markup {
    if faqs.is_empty() {
        return html! {};
    }
    json_ld_script("faq-schema", &faq_schema(faqs))
}

const COMMON: &[(&str, &str)] = &[
    (
        "Is KanaDojo free to use?",
        "Yes, KanaDojo is completely free to use. All features including Hiragana, Katakana, Kanji practice, vocabulary training, and the Japanese translator are available at no cost.",
    ),
    (
        "Do I need to create an account?",
        "No account is required to use KanaDojo. Your progress is saved locally in your browser, so you can start learning immediately without any signup process.",
    ),
    (
        "What Japanese writing systems does KanaDojo teach?",
        "KanaDojo teaches all three Japanese writing systems: Hiragana (basic phonetic characters), Katakana (used for foreign words), and Kanji (Chinese characters organized by JLPT levels N5-N1).",
    ),
    (
        "Can KanaDojo help me prepare for the JLPT?",
        "Yes! KanaDojo organizes Kanji and vocabulary by JLPT levels (N5 through N1), making it an excellent tool for JLPT preparation. Practice the specific characters and words you need for your target level.",
    ),
    (
        "How does the progress tracking work?",
        "KanaDojo automatically tracks your learning progress, including accuracy rates, practice time, and mastered characters. All data is stored locally in your browser and remains private.",
    ),
    (
        "Does KanaDojo work offline?",
        "KanaDojo works best with an internet connection, but core features like character practice are available offline once the page has loaded. Your progress is always saved locally.",
    ),
    (
        "What is the Japanese translator feature?",
        "The KanaDojo translator converts between English and Japanese, providing translations in Hiragana, Katakana, and Kanji, along with Romaji pronunciation. It is free to use without any signup.",
    ),
    (
        "Can I customize the appearance of KanaDojo?",
        "Yes! KanaDojo offers 100+ themes and multiple font options to personalize your learning experience. Find the style that works best for you in the Preferences section.",
    ),
];

const HIRAGANA: &[(&str, &str)] = &[
    (
        "What is Hiragana?",
        "Hiragana is one of three Japanese writing systems, consisting of 46 basic characters that represent syllables. It is used for native Japanese words, grammatical elements, and when Kanji is too difficult or unknown.",
    ),
    (
        "How long does it take to learn Hiragana?",
        "With consistent daily practice, most learners can memorize all 46 Hiragana characters in 1-2 weeks. KanaDojo provides interactive games and exercises to help you master Hiragana efficiently.",
    ),
    (
        "Should I learn Hiragana or Katakana first?",
        "It is generally recommended to learn Hiragana first, as it is more commonly used in Japanese text. Once you have mastered Hiragana, learning Katakana becomes easier due to similar learning patterns.",
    ),
    (
        "What is the difference between Hiragana and Katakana?",
        "Both Hiragana and Katakana represent the same sounds, but they are used for different purposes. Hiragana is used for native Japanese words and grammar, while Katakana is primarily used for foreign words, names, and emphasis.",
    ),
];

const KANJI: &[(&str, &str)] = &[
    (
        "How many Kanji do I need to learn?",
        "For basic literacy, you should know about 2,000 Kanji (Jouyou Kanji). For JLPT N5, you need about 100 Kanji; N4 needs 300; N3 needs 650; N2 needs 1,000; and N1 requires around 2,000 Kanji.",
    ),
    (
        "What are Onyomi and Kunyomi readings?",
        "Onyomi is the Chinese-derived reading of a Kanji, often used in compound words. Kunyomi is the native Japanese reading, typically used when the Kanji stands alone. Most Kanji have multiple readings depending on context.",
    ),
    (
        "How should I practice Kanji effectively?",
        "Effective Kanji practice includes: learning stroke order, practicing writing by hand, studying radicals, using spaced repetition, learning vocabulary that uses the Kanji, and practicing with context sentences.",
    ),
];

fn to_items(pairs: &[(&str, &str)]) -> Vec<FaqItem> {
    pairs.iter().map(|(q, a)| FaqItem::new(*q, *a)).collect()
}

pub fn common_faqs() -> Vec<FaqItem> {
    to_items(COMMON)
}

pub fn hiragana_faqs() -> Vec<FaqItem> {
    to_items(HIRAGANA)
}

pub fn kanji_faqs() -> Vec<FaqItem> {
    to_items(KANJI)
}
