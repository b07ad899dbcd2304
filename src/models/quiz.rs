//! 听力 / 阅读测验
//!
//! 固定题库，每题一个正确选项和分值。作答按题目顺序给出选项下标，
//! 缺答、多答、越界下标都不会 panic：缺答和越界按答错处理，多出的答案忽略。

use serde::{Deserialize, Serialize};

/// 单道选择题
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// 正确选项下标（从0开始）
    pub correct_answer: usize,
    pub points: f64,
}

impl QuizQuestion {
    /// 判断作答是否正确，越界下标视为答错
    pub fn is_correct(&self, answer: usize) -> bool {
        answer < self.options.len() && answer == self.correct_answer
    }
}

/// 一套测验
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quiz {
    pub name: &'static str,
    pub questions: &'static [QuizQuestion],
}

/// 测验得分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: f64,
    pub correct_answers: usize,
    pub total_questions: usize,
    /// 满分
    pub max_score: f64,
}

impl Quiz {
    /// 满分
    pub fn max_score(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// 按题目顺序评分
    ///
    /// # 参数
    /// - `answers`: 每题选中的选项下标
    ///
    /// # 返回
    /// 得分与答对题数
    pub fn score_answers(&self, answers: &[usize]) -> QuizResult {
        let (score, correct_answers) = self
            .questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .fold((0.0, 0), |(score, correct), (question, _)| {
                (score + question.points, correct + 1)
            });

        QuizResult {
            score,
            correct_answers,
            total_questions: self.questions.len(),
            max_score: self.max_score(),
        }
    }
}

/// 听力测验（旅行与英语学习视频）
pub static LISTENING_QUIZ: Quiz = Quiz {
    name: "listening",
    questions: &[
        QuizQuestion {
            prompt: "What is the main purpose of this listening?",
            options: &[
                "To describe the various benefits of traveling for personal growth",
                "To show how traveling helps improve English skills",
                "To highlight different methods of learning English",
            ],
            correct_answer: 1,
            points: 2.0,
        },
        QuizQuestion {
            prompt: "What opportunity does traveling to English-speaking countries provide?",
            options: &[
                "The opportunity to access native English resources",
                "The chance to learn about cultural traditions",
                "The chance to practice real-life conversations",
            ],
            correct_answer: 2,
            points: 2.0,
        },
        QuizQuestion {
            prompt: "What specific example does Olivia give for experiencing culture?",
            options: &[
                "Attending local cultural festivals",
                "Visiting museums and local markets",
                "Participating in community workshops",
            ],
            correct_answer: 1,
            points: 2.0,
        },
        QuizQuestion {
            prompt: "Why is learning through travel more effective than textbooks?",
            options: &[
                "Because travel exposes you to authentic language use in real contexts",
                "Because textbooks often lack examples of natural, conversational language",
                "Because teachers can't substitute real-world scenarios",
            ],
            correct_answer: 0,
            points: 2.0,
        },
        QuizQuestion {
            prompt: "What helps you understand the language better?",
            options: &[
                "Studying grammar rules to build a strong foundation",
                "Experiencing the culture and its context",
                "Reading newspapers to expand vocabulary and comprehension",
            ],
            correct_answer: 1,
            points: 2.0,
        },
    ],
};

/// 阅读测验（伦敦旅行小贴士）
pub static READING_QUIZ: Quiz = Quiz {
    name: "reading",
    questions: &[
        QuizQuestion {
            prompt: "What is a good way to travel quickly around London?",
            options: &["By car", "By bus", "By Underground"],
            correct_answer: 2,
            points: 3.0,
        },
        QuizQuestion {
            prompt: "Why should you check the weather in London?",
            options: &[
                "The weather changes often",
                "It is always sunny",
                "It is always raining",
            ],
            correct_answer: 0,
            points: 3.5,
        },
        QuizQuestion {
            prompt: "What is a good way to save money on travel fares in London?",
            options: &[
                "Buy a paper ticket",
                "Use an Oyster card or contactless bank card",
                "Pay in cash",
            ],
            correct_answer: 1,
            points: 3.5,
        },
    ],
};
