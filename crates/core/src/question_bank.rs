//! Static catalog of interview questions, keyed by category.

use std::collections::BTreeMap;

use crate::model::Category;
use crate::random::RandomSource;

const TECHNICAL: [&str; 10] = [
    "Explain the difference between var, let, and const in JavaScript.",
    "What is the virtual DOM in React and how does it work?",
    "Describe the concept of closures in JavaScript.",
    "What are React hooks and how do they improve component development?",
    "Explain the concept of promises in JavaScript and how they differ from callbacks.",
    "What is the difference between == and === in JavaScript?",
    "Describe the box model in CSS.",
    "What is event delegation in JavaScript?",
    "Explain how prototypal inheritance works in JavaScript.",
    "What is the purpose of the useEffect hook in React?",
];

const BEHAVIORAL: [&str; 10] = [
    "Tell me about a time when you had to work under pressure to meet a deadline.",
    "Describe a situation where you had to resolve a conflict within your team.",
    "How do you handle criticism of your work?",
    "Tell me about a time when you had to learn a new skill quickly.",
    "Describe a project where you demonstrated leadership skills.",
    "How do you prioritize tasks when you have multiple deadlines?",
    "Tell me about a time when you failed at something and what you learned from it.",
    "How do you stay motivated when working on challenging projects?",
    "Describe a situation where you had to adapt to a significant change at work.",
    "Tell me about a time when you went above and beyond what was required.",
];

const SYSTEM_DESIGN: [&str; 10] = [
    "How would you design a URL shortening service like bit.ly?",
    "Design a social media feed system that can handle millions of users.",
    "How would you design a distributed file storage system?",
    "Design a notification system for a mobile application.",
    "How would you design a real-time chat application?",
    "Design a recommendation system for an e-commerce website.",
    "How would you design a scalable API rate limiter?",
    "Design a system for a ride-sharing application like Uber.",
    "How would you design a distributed cache system?",
    "Design a system for processing and analyzing large amounts of data.",
];

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    pub category: Category,
    pub text: String,
}

impl QuestionEntry {
    #[must_use]
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Immutable question catalog with a sampling function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    pools: BTreeMap<Category, Vec<String>>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuestionBank {
    /// The built-in catalog: ten questions per category.
    #[must_use]
    pub fn standard() -> Self {
        let entries = [
            (Category::Technical, &TECHNICAL),
            (Category::Behavioral, &BEHAVIORAL),
            (Category::SystemDesign, &SYSTEM_DESIGN),
        ]
        .into_iter()
        .flat_map(|(category, pool)| {
            pool.iter()
                .map(move |text| QuestionEntry::new(category, *text))
        });
        Self::from_entries(entries)
    }

    /// Build a catalog from arbitrary entries.
    ///
    /// Entry order is preserved per category. Repeated texts within one category
    /// are kept once so samples never contain the same question twice.
    pub fn from_entries(entries: impl IntoIterator<Item = QuestionEntry>) -> Self {
        let mut pools: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for entry in entries {
            let pool = pools.entry(entry.category).or_default();
            if !pool.contains(&entry.text) {
                pool.push(entry.text);
            }
        }
        Self { pools }
    }

    /// All questions for a category, in catalog order.
    #[must_use]
    pub fn pool(&self, category: Category) -> &[String] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Categories that have at least one question.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.pools
            .iter()
            .filter(|(_, pool)| !pool.is_empty())
            .map(|(category, _)| *category)
    }

    /// Draw `count` distinct questions from a category without replacement.
    ///
    /// Asking for more questions than the pool holds returns the whole pool in
    /// shuffled order rather than failing.
    pub fn sample(
        &self,
        category: Category,
        count: usize,
        random: &mut dyn RandomSource,
    ) -> Vec<String> {
        let mut pool: Vec<&String> = self.pool(category).iter().collect();
        let take = count.min(pool.len());

        // Partial Fisher-Yates: the first `take` slots end up uniformly chosen.
        for i in 0..take {
            let remaining = pool.len() - i;
            let j = i + random.next_index(remaining) % remaining;
            pool.swap(i, j);
        }

        pool.into_iter().take(take).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_has_ten_per_category() {
        let bank = QuestionBank::standard();
        for category in Category::ALL {
            assert_eq!(bank.pool(category).len(), 10);
        }
        assert_eq!(bank.categories().count(), 3);
    }

    #[test]
    fn sample_returns_distinct_questions_from_category() {
        let bank = QuestionBank::standard();
        let mut random = ScriptedRandom::new(vec![3, 1, 4, 1, 5]);
        let picked = bank.sample(Category::Behavioral, 5, &mut random);

        assert_eq!(picked.len(), 5);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(
            picked
                .iter()
                .all(|q| bank.pool(Category::Behavioral).contains(q))
        );
    }

    #[test]
    fn sample_with_zero_script_keeps_catalog_order() {
        let bank = QuestionBank::standard();
        let picked = bank.sample(Category::Technical, 2, &mut ScriptedRandom::zeros());
        assert_eq!(
            picked,
            vec![TECHNICAL[0].to_string(), TECHNICAL[1].to_string()]
        );
    }

    struct Overshooting;

    impl RandomSource for Overshooting {
        fn next_index(&mut self, upper: usize) -> usize {
            upper * 2 + 1
        }
    }

    #[test]
    fn out_of_range_source_still_samples_distinct_questions() {
        let bank = QuestionBank::standard();
        let picked = bank.sample(Category::Technical, 5, &mut Overshooting);

        assert_eq!(picked.len(), 5);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn oversized_request_clamps_to_pool() {
        let bank = QuestionBank::from_entries([
            QuestionEntry::new(Category::SystemDesign, "Design a queue."),
            QuestionEntry::new(Category::SystemDesign, "Design a cache."),
            QuestionEntry::new(Category::SystemDesign, "Design a cache."),
        ]);
        let picked = bank.sample(
            Category::SystemDesign,
            5,
            &mut ScriptedRandom::new(vec![1]),
        );
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn missing_category_samples_nothing() {
        let bank = QuestionBank::from_entries([QuestionEntry::new(Category::Technical, "Q")]);
        assert!(
            bank.sample(Category::Behavioral, 5, &mut ScriptedRandom::zeros())
                .is_empty()
        );
        assert_eq!(bank.categories().collect::<Vec<_>>(), vec![Category::Technical]);
    }
}
