// src/services/catalog.rs

//! Seed quizzes written on first initialization.

use chrono::{DateTime, Utc};

use crate::models::{Audience, question::Question, quiz::Quiz};

const SEED_AUTHOR: &str = "admin";

fn question(id: i64, text: &str, options: [&str; 4], correct_answer: usize, time_limit: u32) -> Question {
    Question {
        id,
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        time_limit,
    }
}

fn quiz(
    id: i64,
    title: &str,
    category: &str,
    difficulty: &str,
    questions: Vec<Question>,
    created_date: DateTime<Utc>,
    target_audience: Audience,
) -> Quiz {
    Quiz {
        id,
        title: title.to_string(),
        category: category.to_string(),
        difficulty: difficulty.to_string(),
        questions,
        created_by: SEED_AUTHOR.to_string(),
        created_date,
        target_audience,
    }
}

pub fn default_school_quizzes(now: DateTime<Utc>) -> Vec<Quiz> {
    vec![
        quiz(
            1,
            "Biodiversity Basics",
            "biodiversity",
            "easy",
            vec![
                question(
                    1,
                    "What is biodiversity?",
                    ["Variety of life forms", "Number of species", "Genetic diversity", "All of the above"],
                    3,
                    30,
                ),
                question(
                    2,
                    "Which of these is NOT a type of biodiversity?",
                    ["Genetic diversity", "Species diversity", "Color diversity", "Ecosystem diversity"],
                    2,
                    30,
                ),
            ],
            now,
            Audience::School,
        ),
        quiz(
            2,
            "Climate Change 101",
            "climate",
            "medium",
            vec![
                question(
                    1,
                    "What is the main cause of global warming?",
                    ["Solar radiation", "Greenhouse gases", "Ocean currents", "Volcanic activity"],
                    1,
                    45,
                ),
                question(
                    2,
                    "Which gas is the most abundant greenhouse gas?",
                    ["Methane", "Carbon Dioxide", "Nitrous oxide", "Ozone"],
                    1,
                    45,
                ),
            ],
            now,
            Audience::School,
        ),
    ]
}

pub fn default_college_quizzes(now: DateTime<Utc>) -> Vec<Quiz> {
    vec![
        quiz(
            101,
            "Advanced Climate Science",
            "climate",
            "hard",
            vec![
                question(
                    1,
                    "What is the carbon cycle and its major components?",
                    [
                        "Atmosphere-Biosphere-Lithosphere",
                        "Only atmospheric CO2",
                        "Ocean-Atmosphere exchange",
                        "All of above",
                    ],
                    3,
                    60,
                ),
                question(
                    2,
                    "How do anthropogenic activities affect the carbon cycle?",
                    [
                        "Increase CO2 emissions",
                        "Reduce forest cover",
                        "Alter atmospheric composition",
                        "All correct",
                    ],
                    3,
                    60,
                ),
            ],
            now,
            Audience::College,
        ),
        quiz(
            102,
            "Circular Economy Principles",
            "sustainability",
            "medium",
            vec![question(
                1,
                "What are the 3 principles of circular economy?",
                [
                    "Reduce, Reuse, Recycle",
                    "Design, Make, Dispose",
                    "Produce, Consume, Waste",
                    "Source, Process, Distribute",
                ],
                0,
                50,
            )],
            now,
            Audience::College,
        ),
    ]
}
