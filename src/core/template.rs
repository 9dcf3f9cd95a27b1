//! Parameterized question templates, keyed by `(subject, difficulty)` and
//! gated by grade.
//!
//! Each template samples its own numbers or table row and renders content,
//! four distinct options (the correct one first, shuffled later), and an
//! explanation. A template also declares the grades it suits: hard math for
//! grade 2 is multi-step arithmetic, not calculus. The registry is plain data
//! built once at startup and handed to the generator.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::core::classify::QuestionType;
use crate::core::question::{Difficulty, Subject};

/// Coarse grade bands (1-2, 3-4, ... 11-12) used to scale sampled numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand(u8);

impl GradeBand
{
    pub fn from_grade(grade: u8) -> Self
    {
        Self(grade.clamp(1, 12).div_ceil(2))
    }

    /// 1 for grades 1-2 up to 6 for grades 11-12.
    pub fn level(self) -> i64
    {
        i64::from(self.0)
    }
}

/// Rendered template output. `options[0]` is the correct answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft
{
    pub content: String,
    pub options: Vec<String>,
    pub explanation: String,
}

impl Draft
{
    /// Build a draft from a correct answer and candidate distractors.
    ///
    /// Candidates equal to the answer or to each other are skipped; `pad(k)`
    /// for k = 1, 2, ... tops the list up to four distinct options.
    pub fn new(
        content: String,
        correct: String,
        candidates: impl IntoIterator<Item = String>,
        mut pad: impl FnMut(i64) -> String,
        explanation: String,
    ) -> Self
    {
        let mut options = vec![correct];

        for c in candidates
        {
            if options.len() == 4
            {
                break;
            }
            if !options.contains(&c)
            {
                options.push(c);
            }
        }

        let mut k = 1;
        while options.len() < 4
        {
            let c = pad(k);
            if !options.contains(&c)
            {
                options.push(c);
            }
            k += 1;
        }

        Self { content, options, explanation }
    }

    /// Integer answer with a unit suffix (empty for none).
    fn numeric(
        content: String,
        correct: i64,
        candidates: &[i64],
        unit: &str,
        explanation: String,
    ) -> Self
    {
        let fmt = |n: i64| {
            if unit.is_empty() { n.to_string() } else { format!("{n} {unit}") }
        };
        Self::new(
            content,
            fmt(correct),
            candidates
                .iter()
                .map(|&n| fmt(n)),
            |k| fmt(correct + k),
            explanation,
        )
    }

    pub fn correct(&self) -> &str
    {
        &self.options[0]
    }
}

pub type RenderFn = fn(&mut dyn RngCore, GradeBand) -> Draft;

/// A named renderer together with the type its output is meant to classify as
/// and the grades it may be used for.
#[derive(Clone, Copy)]
pub struct Template
{
    pub name: &'static str,
    pub kind: QuestionType,
    min_grade: u8,
    max_grade: u8,
    render: RenderFn,
}

impl std::fmt::Debug for Template
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("grades", &(self.min_grade..=self.max_grade))
            .finish()
    }
}

impl Template
{
    pub const fn new(
        name: &'static str,
        kind: QuestionType,
        render: RenderFn,
    ) -> Self
    {
        Self { name, kind, min_grade: 1, max_grade: 12, render }
    }

    /// Restrict to grades `lo..=hi`.
    pub const fn grades(
        mut self,
        lo: u8,
        hi: u8,
    ) -> Self
    {
        self.min_grade = lo;
        self.max_grade = hi;
        self
    }

    pub fn covers(
        &self,
        grade: u8,
    ) -> bool
    {
        (self.min_grade..=self.max_grade).contains(&grade)
    }

    /// Grades between `grade` and the nearest grade this template covers.
    pub fn grade_distance(
        &self,
        grade: u8,
    ) -> u8
    {
        if grade < self.min_grade
        {
            self.min_grade - grade
        }
        else
        {
            grade.saturating_sub(self.max_grade)
        }
    }

    pub fn render(
        &self,
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        (self.render)(rng, band)
    }
}

/// Templates per `(subject, difficulty)`. Missing entries mean "fallback only".
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry
{
    entries: HashMap<(Subject, Difficulty), Vec<Template>>,
}

impl TemplateRegistry
{
    pub fn empty() -> Self
    {
        Self::default()
    }

    pub fn register(
        &mut self,
        subject: Subject,
        difficulty: Difficulty,
        templates: &[Template],
    )
    {
        self.entries
            .entry((subject, difficulty))
            .or_default()
            .extend_from_slice(templates);
    }

    /// Templates for one file. When none covers `grade`, the ones from the
    /// nearest covered grade are used instead. `None` when the subject and
    /// difficulty have no templates at all.
    pub fn templates(
        &self,
        subject: &Subject,
        difficulty: Difficulty,
        grade: u8,
    ) -> Option<Vec<&Template>>
    {
        let all = self
            .entries
            .get(&(subject.clone(), difficulty))?;

        let nearest = all
            .iter()
            .map(|t| t.grade_distance(grade))
            .min()?;
        if nearest > 0
        {
            debug!(%subject, %difficulty, grade, nearest, "no template covers grade; using adjacent grades");
        }

        Some(
            all.iter()
                .filter(|t| t.grade_distance(grade) == nearest)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(Subject, Difficulty), &Template)>
    {
        self.entries
            .iter()
            .flat_map(|(k, v)| {
                v.iter()
                    .map(move |t| (k, t))
            })
    }

    /// Built-in library for math, english, reading and thinking-skills.
    pub fn builtin() -> Self
    {
        use Difficulty::*;
        use QuestionType as T;

        let mut r = Self::empty();

        r.register(Subject::Math, Easy, &[
            Template::new("addition", T::Addition, math::addition).grades(1, 5),
            Template::new("subtraction", T::Subtraction, math::subtraction).grades(1, 5),
            Template::new("multiplication", T::Multiplication, math::multiplication).grades(2, 7),
            Template::new("division", T::Division, math::division).grades(3, 7),
            Template::new("word-problem", T::WordProblem, math::word_problem).grades(1, 8),
            Template::new("unit-conversion", T::Measurement, math::unit_conversion).grades(2, 8),
            Template::new("fraction-to-decimal", T::FractionDecimal, math::fraction_to_decimal).grades(4, 10),
            Template::new("rectangle-area", T::Geometry, math::rectangle_area).grades(5, 9),
            Template::new("percent-of", T::Percentage, math::percent_of).grades(7, 12),
            Template::new("mean", T::Statistics, math::mean).grades(7, 12),
            Template::new("linear-equation", T::LinearEquation, math::linear_equation).grades(8, 12),
            Template::new("function-value", T::FunctionEvaluation, math::function_value).grades(9, 12),
            Template::new("slope", T::Slope, math::slope).grades(10, 12),
        ]);
        r.register(Subject::Math, Medium, &[
            Template::new("addition", T::Addition, math::addition).grades(1, 2),
            Template::new("subtraction", T::Subtraction, math::subtraction).grades(1, 3),
            Template::new("multiplication", T::Multiplication, math::multiplication).grades(2, 5),
            Template::new("division", T::Division, math::division).grades(3, 6),
            Template::new("word-problem", T::WordProblem, math::word_problem).grades(1, 6),
            Template::new("unit-conversion", T::Measurement, math::unit_conversion).grades(2, 6),
            Template::new("square-perimeter", T::Geometry, math::square_perimeter).grades(3, 8),
            Template::new("rectangle-area", T::Geometry, math::rectangle_area).grades(3, 9),
            Template::new("fraction-to-decimal", T::FractionDecimal, math::fraction_to_decimal).grades(4, 8),
            Template::new("mean", T::Statistics, math::mean).grades(4, 12),
            Template::new("simplify-ratio", T::Ratio, math::simplify_ratio).grades(5, 10),
            Template::new("percent-of", T::Percentage, math::percent_of).grades(5, 12),
            Template::new("linear-equation", T::LinearEquation, math::linear_equation).grades(6, 12),
            Template::new("slope", T::Slope, math::slope).grades(8, 12),
            Template::new("probability", T::Probability, math::probability).grades(8, 12),
            Template::new("function-value", T::FunctionEvaluation, math::function_value).grades(9, 12),
        ]);
        // Below grade 7 "hard" means multi-step arithmetic and word problems
        r.register(Subject::Math, Hard, &[
            Template::new("addition", T::Addition, math::addition).grades(1, 2),
            Template::new("subtraction", T::Subtraction, math::subtraction).grades(1, 3),
            Template::new("multiplication", T::Multiplication, math::multiplication).grades(1, 5),
            Template::new("division", T::Division, math::division).grades(2, 6),
            Template::new("word-problem", T::WordProblem, math::word_problem).grades(1, 6),
            Template::new("unit-conversion", T::Measurement, math::unit_conversion).grades(3, 6),
            Template::new("square-perimeter", T::Geometry, math::square_perimeter).grades(3, 5),
            Template::new("rectangle-area", T::Geometry, math::rectangle_area).grades(4, 7),
            Template::new("fraction-to-decimal", T::FractionDecimal, math::fraction_to_decimal).grades(4, 6),
            Template::new("mean", T::Statistics, math::mean).grades(5, 8),
            Template::new("simplify-ratio", T::Ratio, math::simplify_ratio).grades(5, 8),
            Template::new("percent-of", T::Percentage, math::percent_of).grades(5, 8),
            Template::new("linear-equation", T::LinearEquation, math::linear_equation).grades(6, 9),
            Template::new("probability", T::Probability, math::probability).grades(7, 12),
            Template::new("slope", T::Slope, math::slope).grades(7, 10),
            Template::new("function-value", T::FunctionEvaluation, math::function_value).grades(8, 12),
            Template::new("linear-system", T::SystemOfEquations, math::linear_system).grades(8, 12),
            Template::new("factor-trinomial", T::PolynomialFactoring, math::factor_trinomial).grades(8, 12),
            Template::new("quadratic-roots", T::Quadratic, math::quadratic_roots).grades(9, 12),
            Template::new("exponential-equation", T::Exponential, math::exponential_equation).grades(9, 12),
            Template::new("trig-value", T::Trigonometry, math::trig_value).grades(9, 12),
            Template::new("determinant", T::Matrix, math::determinant).grades(10, 12),
            Template::new("logarithm", T::Logarithm, math::logarithm).grades(10, 12),
            Template::new("derivative", T::CalculusDerivative, math::derivative).grades(11, 12),
        ]);

        r.register(Subject::English, Easy, &[
            Template::new("synonym", T::Synonym, english::synonym),
            Template::new("antonym", T::Antonym, english::antonym),
            Template::new("past-tense", T::PastTense, english::past_tense).grades(1, 8),
            Template::new("parts-of-speech", T::PartsOfSpeech, english::parts_of_speech),
            Template::new("spelling", T::Spelling, english::spelling),
            Template::new("punctuation", T::Punctuation, english::punctuation).grades(5, 12),
            Template::new("agreement", T::Agreement, english::agreement).grades(7, 12),
        ]);
        r.register(Subject::English, Medium, &[
            Template::new("synonym", T::Synonym, english::synonym).grades(1, 5),
            Template::new("antonym", T::Antonym, english::antonym).grades(1, 8),
            Template::new("spelling", T::Spelling, english::spelling).grades(1, 9),
            Template::new("punctuation", T::Punctuation, english::punctuation),
            Template::new("agreement", T::Agreement, english::agreement),
            Template::new("literary-device", T::LiteraryDevice, english::literary_device).grades(5, 12),
        ]);
        r.register(Subject::English, Hard, &[
            Template::new("past-tense", T::PastTense, english::past_tense).grades(1, 4),
            Template::new("spelling", T::Spelling, english::spelling).grades(1, 6),
            Template::new("punctuation", T::Punctuation, english::punctuation).grades(1, 7),
            Template::new("agreement", T::Agreement, english::agreement),
            Template::new("literary-device", T::LiteraryDevice, english::literary_device).grades(4, 12),
            Template::new("subordinate-clause", T::SubordinateClause, english::subordinate_clause).grades(5, 12),
            Template::new("rhetorical-device", T::LiteraryDevice, english::rhetorical_device).grades(7, 12),
            Template::new("subjunctive", T::SubjunctiveMood, english::subjunctive).grades(8, 12),
        ]);

        let reading = [
            Template::new("main-idea", T::MainIdea, reading::main_idea),
            Template::new("inference", T::Inference, reading::inference),
            Template::new("author-purpose", T::AuthorPurpose, reading::author_purpose),
            Template::new("vocabulary", T::VocabularyInContext, reading::vocabulary),
        ];
        let thinking = [
            Template::new("number-pattern", T::PatternCompletion, thinking::number_pattern),
            Template::new("square-pattern", T::PatternCompletion, thinking::square_pattern),
            Template::new("letter-sequence", T::LetterSequence, thinking::letter_sequence),
            Template::new("syllogism", T::Syllogism, thinking::syllogism),
            Template::new("snail", T::SnailProblem, thinking::snail),
            Template::new("round-robin", T::TournamentProblem, thinking::round_robin),
        ];
        for d in Difficulty::ALL
        {
            r.register(Subject::Reading, d, &reading);
            r.register(Subject::ThinkingSkills, d, &thinking);
        }

        r
    }
}

fn pick<'a, T>(
    rng: &mut dyn RngCore,
    items: &'a [T],
) -> &'a T
{
    &items[rng.random_range(0..items.len())]
}

/// Wrong answers drawn from a pool, excluding the correct one.
fn shuffled_others(
    rng: &mut dyn RngCore,
    pool: &[&str],
    correct: &str,
) -> Vec<String>
{
    let mut others: Vec<String> = pool
        .iter()
        .filter(|s| **s != correct)
        .map(|s| s.to_string())
        .collect();
    others.shuffle(rng);
    others
}

/// `+ 3`, `- 3`, `+ x` style term with a leading sign.
fn signed(
    n: i64,
    var: &str,
) -> String
{
    let sign = if n < 0 { '-' } else { '+' };
    let abs = n.abs();
    if !var.is_empty() && abs == 1
    {
        format!("{sign} {var}")
    }
    else
    {
        format!("{sign} {abs}{var}")
    }
}

mod math
{
    use super::*;

    pub fn addition(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let hi = 10 + 10 * band.level();
        let a = rng.random_range(2..=hi);
        let b = rng.random_range(2..=hi);
        let sum = a + b;
        Draft::numeric(
            format!("What is {a} + {b}?"),
            sum,
            &[sum + 1, sum - 1, sum + 10],
            "",
            format!("Adding the two numbers: {a} + {b} = {sum}"),
        )
    }

    pub fn subtraction(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let a = rng.random_range(10..=10 + 15 * band.level());
        let b = rng.random_range(2..a);
        let diff = a - b;
        Draft::numeric(
            format!("What is {a} - {b}?"),
            diff,
            &[diff + 1, diff - 1, a + b],
            "",
            format!("Taking {b} away from {a}: {a} - {b} = {diff}"),
        )
    }

    pub fn multiplication(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let a = rng.random_range(2..=2 + 2 * band.level());
        let b = rng.random_range(2..=12);
        let product = a * b;
        Draft::numeric(
            format!("What is {a} × {b}?"),
            product,
            &[product + a, product - b, a + b],
            "",
            format!("{a} groups of {b}: {a} × {b} = {product}"),
        )
    }

    pub fn division(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let divisor = rng.random_range(2..=12);
        let quotient = rng.random_range(2..=2 + 2 * band.level());
        let dividend = divisor * quotient;
        Draft::numeric(
            format!("What is {dividend} ÷ {divisor}?"),
            quotient,
            &[quotient + 1, quotient - 1, divisor],
            "",
            format!("{divisor} × {quotient} = {dividend}, so {dividend} ÷ {divisor} = {quotient}"),
        )
    }

    const FRACTIONS: [(u32, u32, &str); 12] = [
        (1, 2, "0.5"),
        (1, 4, "0.25"),
        (3, 4, "0.75"),
        (1, 5, "0.2"),
        (2, 5, "0.4"),
        (3, 5, "0.6"),
        (4, 5, "0.8"),
        (1, 10, "0.1"),
        (3, 10, "0.3"),
        (7, 10, "0.7"),
        (1, 8, "0.125"),
        (3, 8, "0.375"),
    ];

    pub fn fraction_to_decimal(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (n, d, dec) = *pick(rng, &FRACTIONS);
        let pool: Vec<&str> = FRACTIONS
            .iter()
            .map(|f| f.2)
            .collect();
        Draft::new(
            format!("Convert {n}/{d} to a decimal."),
            dec.to_string(),
            shuffled_others(rng, &pool, dec),
            |k| format!("{}.{k}", k + 1),
            format!("{n} ÷ {d} = {dec}"),
        )
    }

    const UNITS: [(&str, &str, i64); 6] = [
        ("centimeters", "meters", 100),
        ("minutes", "hours", 60),
        ("days", "weeks", 7),
        ("months", "years", 12),
        ("grams", "kilograms", 1000),
        ("seconds", "minutes", 60),
    ];

    pub fn unit_conversion(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let (small, big, factor) = *pick(rng, &UNITS);
        let n = rng.random_range(2..=3 + band.level());
        let answer = n * factor;
        Draft::numeric(
            format!("How many {small} are in {n} {big}?"),
            answer,
            &[answer + factor, answer - factor, answer + 1],
            "",
            format!("Each of the {n} {big} has {factor} {small}, so {n} × {factor} = {answer}"),
        )
    }

    const NAMES: [&str; 6] = ["Sam", "Mia", "Leo", "Ava", "Noah", "Zara"];
    const ITEMS: [&str; 6] = ["apples", "stickers", "marbles", "pencils", "shells", "cards"];

    pub fn word_problem(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let name = *pick(rng, &NAMES);
        let item = *pick(rng, &ITEMS);
        let a = rng.random_range(5..=10 + 10 * band.level());
        let b = rng.random_range(2..a);

        if rng.random_bool(0.5)
        {
            let total = a + b;
            Draft::numeric(
                format!("{name} has {a} {item} and gets {b} more. How many {item} does {name} have now?"),
                total,
                &[a - b, total + 1, total - 1],
                "",
                format!("{a} + {b} = {total} {item}"),
            )
        }
        else
        {
            let left = a - b;
            Draft::numeric(
                format!("{name} has {a} {item} and gives away {b}. How many {item} does {name} have left?"),
                left,
                &[a + b, left + 1, left - 1],
                "",
                format!("{a} - {b} = {left} {item}"),
            )
        }
    }

    pub fn linear_equation(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let x = rng.random_range(1..=5 + 2 * band.level());
        let a = rng.random_range(2..=9);
        let b = rng.random_range(1..=20);
        let c = a * x + b;
        let fmt = |v: i64| format!("x = {v}");
        Draft::new(
            format!("Solve for x: {a}x + {b} = {c}"),
            fmt(x),
            [fmt(x + 1), fmt(x - 1), fmt(c - b)],
            |k| fmt(x + 1 + k),
            format!("Subtract {b}: {a}x = {}. Divide by {a}: x = {x}", c - b),
        )
    }

    pub fn rectangle_area(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let l = rng.random_range(3..=5 + 3 * band.level());
        let w = rng.random_range(2..=l);
        let area = l * w;
        Draft::numeric(
            format!("A rectangle has length {l} cm and width {w} cm. What is its area?"),
            area,
            &[2 * (l + w), area + l, l + w],
            "cm²",
            format!("Area = length × width = {l} × {w} = {area} cm²"),
        )
    }

    pub fn square_perimeter(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let s = rng.random_range(3..=4 + 3 * band.level());
        let p = 4 * s;
        Draft::numeric(
            format!("A square has side length {s} cm. What is its perimeter?"),
            p,
            &[s * s, 2 * s, p + 4],
            "cm",
            format!("Perimeter = 4 × side = 4 × {s} = {p} cm"),
        )
    }

    const RATIOS: [(i64, i64); 8] = [(1, 2), (2, 3), (3, 4), (1, 3), (2, 5), (3, 5), (4, 5), (1, 4)];

    pub fn simplify_ratio(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let (p, q) = *pick(rng, &RATIOS);
        let k = rng.random_range(2..=3 + band.level());
        let (a, b) = (k * p, k * q);
        Draft::new(
            format!("Simplify the ratio {a}:{b}."),
            format!("{p}:{q}"),
            [format!("{q}:{p}"), format!("{}:{q}", p + 1), format!("{p}:{}", q + 1)],
            |n| format!("{p}:{}", q + 1 + n),
            format!("Divide both parts by {k}: {a}:{b} = {p}:{q}"),
        )
    }

    const PERCENTS: [i64; 5] = [10, 20, 25, 50, 75];

    pub fn percent_of(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let p = *pick(rng, &PERCENTS);
        let n = 20 * rng.random_range(1..=2 + band.level());
        let answer = p * n / 100;
        Draft::numeric(
            format!("What is {p}% of {n}?"),
            answer,
            &[answer + p / 5, n - answer, answer * 2],
            "",
            format!("{p}% of {n} = {p}/100 × {n} = {answer}"),
        )
    }

    pub fn mean(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let m = rng.random_range(5..=5 + 10 * band.level());
        let d1 = rng.random_range(1..=4);
        let d2 = rng.random_range(1..=4);
        let values = [m - d1, m + d2, m + d1, m - d2];
        Draft::numeric(
            format!(
                "What is the mean of {}, {}, {} and {}?",
                values[0], values[1], values[2], values[3]
            ),
            m,
            &[m + 1, m - 1, 4 * m],
            "",
            format!("The values add up to {}, and {} ÷ 4 = {m}", 4 * m, 4 * m),
        )
    }

    pub fn slope(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let m = rng.random_range(1..=5) * if rng.random_bool(0.5) { 1 } else { -1 };
        let x1 = rng.random_range(-5..=5);
        let y1 = rng.random_range(-5..=5);
        let dx = rng.random_range(1..=4);
        let (x2, y2) = (x1 + dx, y1 + m * dx);
        Draft::numeric(
            format!("What is the slope of the line through ({x1}, {y1}) and ({x2}, {y2})?"),
            m,
            &[-m, m + 1, dx],
            "",
            format!("Slope = ({y2} - ({y1})) / ({x2} - ({x1})) = {} / {dx} = {m}", m * dx),
        )
    }

    fn root_pair(
        a: i64,
        b: i64,
    ) -> String
    {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        format!("x = {lo} or x = {hi}")
    }

    pub fn quadratic_roots(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let sample = |rng: &mut dyn RngCore| {
            let v = rng.random_range(1..=6);
            if rng.random_bool(0.5) { v } else { -v }
        };
        let (mut r1, mut r2) = (sample(rng), sample(rng));
        while r1 == r2 || r1 == -r2
        {
            r1 = sample(rng);
            r2 = sample(rng);
        }

        let b = -(r1 + r2);
        let c = r1 * r2;
        Draft::new(
            format!("Solve the quadratic equation x² {} {} = 0.", signed(b, "x"), signed(c, "")),
            root_pair(r1, r2),
            [root_pair(-r1, -r2), root_pair(r1 + 1, r2 + 1), root_pair(b, c)],
            |k| root_pair(r1.min(r2) - k, r1.max(r2) + k),
            format!(
                "x² {} {} = (x {})(x {}) = 0, so x = {r1} or x = {r2}",
                signed(b, "x"),
                signed(c, ""),
                signed(-r1, ""),
                signed(-r2, "")
            ),
        )
    }

    pub fn linear_system(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let x = rng.random_range(1..=5 + band.level());
        let y = rng.random_range(1..=5 + band.level());
        let (s, d) = (x + y, x - y);
        let fmt = |a: i64, b: i64| format!("x = {a}, y = {b}");
        Draft::new(
            format!("Solve the system of equations: x + y = {s} and x - y = {d}."),
            fmt(x, y),
            [fmt(y, x), fmt(x + 1, y - 1), fmt(s, d)],
            |k| fmt(x + k, y + k),
            format!("Adding the equations gives 2x = {}, so x = {x} and y = {s} - {x} = {y}", 2 * x),
        )
    }

    pub fn derivative(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let a = rng.random_range(2..=9);
        let b = rng.random_range(1..=9);
        Draft::new(
            format!("Find the derivative of f(x) = {a}x² + {b}x."),
            format!("f'(x) = {}x + {b}", 2 * a),
            [
                format!("f'(x) = {a}x + {b}"),
                format!("f'(x) = {}x² + {b}", 2 * a),
                format!("f'(x) = {}x", 2 * a),
            ],
            |k| format!("f'(x) = {}x + {}", 2 * a + k, b),
            format!("Power rule: d/dx({a}x²) = {}x and d/dx({b}x) = {b}", 2 * a),
        )
    }

    const TRIG: [(&str, u32, &str); 11] = [
        ("sin", 30, "1/2"),
        ("sin", 45, "√2/2"),
        ("sin", 60, "√3/2"),
        ("sin", 90, "1"),
        ("cos", 0, "1"),
        ("cos", 30, "√3/2"),
        ("cos", 45, "√2/2"),
        ("cos", 60, "1/2"),
        ("tan", 30, "√3/3"),
        ("tan", 45, "1"),
        ("tan", 60, "√3"),
    ];
    const TRIG_VALUES: [&str; 8] = ["0", "1/2", "√2/2", "√3/2", "1", "√3", "√3/3", "2"];

    pub fn trig_value(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (f, deg, value) = *pick(rng, &TRIG);
        Draft::new(
            format!("What is {f}({deg}°)?"),
            value.to_string(),
            shuffled_others(rng, &TRIG_VALUES, value),
            |k| format!("{k}/3"),
            format!("{f}({deg}°) = {value} (exact value from the special triangles)"),
        )
    }

    pub fn logarithm(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let (content, k) = if rng.random_bool(0.5)
        {
            let k = rng.random_range(2..=(4 + band.level()).min(10));
            (format!("What is log₂({})?", 2_i64.pow(k as u32)), k)
        }
        else
        {
            let k = rng.random_range(1..=6);
            (format!("What is log₁₀({})?", 10_i64.pow(k as u32)), k)
        };
        Draft::numeric(
            content,
            k,
            &[k + 1, k - 1, 2 * k],
            "",
            format!("The base raised to the power {k} gives the argument, so the logarithm is {k}"),
        )
    }

    pub fn exponential_equation(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let base = rng.random_range(2..=5_i64);
        let k = rng.random_range(2..=5_i64);
        let value = base.pow(k as u32);
        let fmt = |v: i64| format!("x = {v}");
        Draft::new(
            format!("Solve for x: {base}^x = {value}"),
            fmt(k),
            [fmt(k + 1), fmt(k - 1), fmt(value / base)],
            |n| fmt(k + 1 + n),
            format!("{base}^{k} = {value}, so x = {k}"),
        )
    }

    pub fn determinant(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let mut v = || rng.random_range(-5..=9_i64);
        let (a, b, c, d) = (v(), v(), v(), v());
        let det = a * d - b * c;
        Draft::numeric(
            format!("Find the determinant of the matrix [[{a}, {b}], [{c}, {d}]]."),
            det,
            &[a * d + b * c, a * c - b * d, a + d],
            "",
            format!("det = ad - bc = ({a})({d}) - ({b})({c}) = {det}"),
        )
    }

    pub fn factor_trinomial(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let lo = rng.random_range(1..=8_i64);
        let hi = rng.random_range(lo + 1..=9);
        let (s, p) = (lo + hi, lo * hi);
        Draft::new(
            format!("Factor: x² + {s}x + {p}"),
            format!("(x + {lo})(x + {hi})"),
            [
                format!("(x - {lo})(x - {hi})"),
                format!("(x + {lo})(x - {hi})"),
                format!("(x + 1)(x + {p})"),
            ],
            |k| format!("(x + {lo})(x + {})", hi + k),
            format!("{lo} × {hi} = {p} and {lo} + {hi} = {s}"),
        )
    }

    pub fn function_value(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let m = rng.random_range(2..=9_i64);
        let b = rng.random_range(-9..=9_i64);
        let x = rng.random_range(1..=6_i64);
        let y = m * x + b;
        let rule = if b == 0 { format!("{m}x") } else { format!("{m}x {}", signed(b, "")) };
        Draft::numeric(
            format!("If f(x) = {rule}, what is f({x})?"),
            y,
            &[y + m, y - b + 1, m + x + b],
            "",
            format!("f({x}) = {m}({x}) {} = {y}", signed(b, "")),
        )
    }

    fn gcd(
        a: i64,
        b: i64,
    ) -> i64
    {
        if b == 0 { a.abs() } else { gcd(b, a % b) }
    }

    fn reduced(
        n: i64,
        d: i64,
    ) -> String
    {
        let g = gcd(n, d).max(1);
        format!("{}/{}", n / g, d / g)
    }

    pub fn probability(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let red = rng.random_range(1..=3 + band.level());
        let blue = rng.random_range(1..=3 + band.level());
        let total = red + blue;
        Draft::new(
            format!(
                "A bag holds {red} red and {blue} blue marbles. What is the probability of drawing a red marble?"
            ),
            reduced(red, total),
            [reduced(blue, total), format!("{red}/{blue}"), format!("1/{total}")],
            |k| format!("{}/{}", red + k, total + k),
            format!("{red} of the {total} marbles are red, so P(red) = {}", reduced(red, total)),
        )
    }
}

mod english
{
    use super::*;

    /// `(prompt word, correct, distractors)`
    type Row = (&'static str, &'static str, [&'static str; 3]);

    fn from_row(
        content: String,
        row: &Row,
        explanation: String,
    ) -> Draft
    {
        let (_, correct, wrong) = row;
        Draft::new(
            content,
            correct.to_string(),
            wrong
                .iter()
                .map(|w| w.to_string()),
            |k| format!("None of these ({k})"),
            explanation,
        )
    }

    const SYNONYMS: [Row; 8] = [
        ("happy", "joyful", ["angry", "tired", "sleepy"]),
        ("big", "large", ["tiny", "short", "narrow"]),
        ("fast", "quick", ["slow", "heavy", "quiet"]),
        ("smart", "clever", ["lazy", "rude", "weak"]),
        ("cold", "chilly", ["warm", "bright", "loud"]),
        ("brave", "courageous", ["fearful", "shy", "gentle"]),
        ("begin", "start", ["finish", "stop", "wait"]),
        ("tiny", "small", ["huge", "wide", "tall"]),
    ];

    pub fn synonym(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &SYNONYMS);
        from_row(
            format!("Which word is a synonym for \"{}\"?", row.0),
            row,
            format!("\"{}\" means nearly the same as \"{}\".", row.1, row.0),
        )
    }

    const ANTONYMS: [Row; 6] = [
        ("hot", "cold", ["warm", "spicy", "sunny"]),
        ("early", "late", ["soon", "first", "quick"]),
        ("empty", "full", ["bare", "hollow", "clear"]),
        ("loud", "quiet", ["noisy", "harsh", "booming"]),
        ("ancient", "modern", ["old", "historic", "aged"]),
        ("generous", "selfish", ["kind", "giving", "helpful"]),
    ];

    pub fn antonym(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &ANTONYMS);
        from_row(
            format!("Which word is the opposite of \"{}\"?", row.0),
            row,
            format!("\"{}\" means the opposite of \"{}\".", row.1, row.0),
        )
    }

    const PAST_TENSE: [Row; 6] = [
        ("run", "ran", ["runned", "running", "runs"]),
        ("swim", "swam", ["swimmed", "swimming", "swims"]),
        ("go", "went", ["goed", "going", "goes"]),
        ("write", "wrote", ["writed", "writing", "writes"]),
        ("catch", "caught", ["catched", "catching", "catches"]),
        ("think", "thought", ["thinked", "thinking", "thinks"]),
    ];

    pub fn past_tense(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &PAST_TENSE);
        from_row(
            format!("What is the past tense of \"{}\"?", row.0),
            row,
            format!("\"{}\" is an irregular verb; its past tense is \"{}\".", row.0, row.1),
        )
    }

    /// `(article + part of speech, correct, distractors)`
    const PARTS_OF_SPEECH: [Row; 4] = [
        ("a noun", "happiness", ["quickly", "beautiful", "run"]),
        ("a verb", "jump", ["table", "green", "softly"]),
        ("an adjective", "bright", ["slowly", "river", "sing"]),
        ("an adverb", "quietly", ["mountain", "yellow", "eat"]),
    ];

    pub fn parts_of_speech(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &PARTS_OF_SPEECH);
        from_row(
            format!("Which word is {}?", row.0),
            row,
            format!("\"{}\" is {}.", row.1, row.0),
        )
    }

    /// `(meaning, correct spelling, misspellings)`
    const SPELLING: [Row; 6] = [
        ("to get something", "receive", ["recieve", "receeve", "recive"]),
        ("apart from each other", "separate", ["seperate", "separete", "seprate"]),
        ("needed", "necessary", ["neccessary", "necesary", "neccesary"]),
        ("without doubt", "definitely", ["definately", "definitly", "definetely"]),
        ("a place to stay", "accommodation", ["accomodation", "acommodation", "accommodasion"]),
        ("at once", "immediately", ["immediatly", "imediately", "immediatley"]),
    ];

    pub fn spelling(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &SPELLING);
        from_row(
            format!("Which is the correct spelling of the word meaning \"{}\"?", row.0),
            row,
            format!("\"{}\" is the correct spelling.", row.1),
        )
    }

    const DEVICES: [&str; 6] =
        ["Personification", "Metaphor", "Simile", "Alliteration", "Onomatopoeia", "Hyperbole"];

    /// `(sentence, device, why)`
    const DEVICE_EXAMPLES: [(&str, &str, &str); 6] = [
        ("The stars danced in the night sky.", "Personification", "Stars are given the human action of dancing."),
        ("Life is a rollercoaster.", "Metaphor", "Life is compared to a rollercoaster without 'like' or 'as'."),
        ("She was as brave as a lion.", "Simile", "The comparison uses 'as'."),
        ("Peter Piper picked a peck of pickled peppers.", "Alliteration", "The 'p' sound repeats at the start of words."),
        ("The bees buzzed in the garden.", "Onomatopoeia", "'Buzzed' imitates the sound it names."),
        ("I have told you a million times.", "Hyperbole", "The number is a deliberate exaggeration."),
    ];

    pub fn literary_device(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (sentence, device, why) = *pick(rng, &DEVICE_EXAMPLES);
        Draft::new(
            format!("What literary device is used in: \"{sentence}\"?"),
            device.to_string(),
            shuffled_others(rng, &DEVICES, device),
            |k| format!("None of these ({k})"),
            why.to_string(),
        )
    }

    const RHETORIC: [&str; 6] = ["Chiasmus", "Antithesis", "Metonymy", "Oxymoron", "Anaphora", "Zeugma"];

    const RHETORIC_EXAMPLES: [(&str, &str, &str); 6] = [
        (
            "Ask not what your country can do for you; ask what you can do for your country.",
            "Chiasmus",
            "The second clause reverses the order of the first.",
        ),
        ("It was the best of times, it was the worst of times.", "Antithesis", "Opposing ideas are set side by side."),
        ("The pen is mightier than the sword.", "Metonymy", "'Pen' and 'sword' stand for writing and force."),
        ("A deafening silence filled the room.", "Oxymoron", "Two contradictory words are paired."),
        ("We shall fight on the beaches, we shall fight on the fields.", "Anaphora", "Successive clauses open with the same words."),
        ("He broke his vow and his mother's heart.", "Zeugma", "One verb governs two objects in different senses."),
    ];

    pub fn rhetorical_device(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (sentence, device, why) = *pick(rng, &RHETORIC_EXAMPLES);
        Draft::new(
            format!("Which literary device does this line use: \"{sentence}\""),
            device.to_string(),
            shuffled_others(rng, &RHETORIC, device),
            |k| format!("None of these ({k})"),
            why.to_string(),
        )
    }

    /// `(focus, correct sentence, incorrect sentences)`
    const PUNCTUATION: [Row; 5] = [
        (
            "a list",
            "We bought apples, pears, and grapes.",
            ["We bought apples pears, and grapes.", "We bought, apples, pears and grapes.", "We bought apples pears and, grapes."],
        ),
        ("a question", "Where are you going?", ["Where are you going.", "Where, are you going?", "where are you going?"]),
        (
            "possession",
            "The dog's bone was buried.",
            ["The dogs bone was buried.", "The dogs' bone's was buried.", "The dog's bone's was buried."],
        ),
        ("dialogue", "\"Let's go,\" said Mia.", ["\"Let's go\" said Mia.", "\"Let's go,\" said Mia", "Let's go, said Mia."]),
        ("a contraction", "They're late again.", ["Theyre late again.", "They'are late again.", "The'yre late again."]),
    ];

    pub fn punctuation(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &PUNCTUATION);
        from_row(
            format!("Which sentence uses correct punctuation for {}?", row.0),
            row,
            format!("\"{}\" is punctuated correctly.", row.1),
        )
    }

    const AGREEMENT: [Row; 5] = [
        (
            "the dogs",
            "The dogs are playing in the yard.",
            ["The dogs is playing in the yard.", "The dogs was playing in the yard.", "The dogs be playing in the yard."],
        ),
        (
            "the team",
            "The team is winning the match.",
            ["The team are winning the match.", "The team were winning the match.", "The team be winning the match."],
        ),
        (
            "my friends",
            "My friends were at the park.",
            ["My friends was at the park.", "My friends is at the park.", "My friends be at the park."],
        ),
        (
            "each student",
            "Each student has a locker.",
            ["Each student have a locker.", "Each student are having a locker.", "Each student haves a locker."],
        ),
        (
            "neither of the boys",
            "Neither of the boys wants to leave.",
            ["Neither of the boys want to leaves.", "Neither of the boys are wanting to leave.", "Neither of the boys wanting to leave."],
        ),
    ];

    pub fn agreement(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &AGREEMENT);
        from_row(
            format!("Which sentence about {} has correct subject-verb agreement?", row.0),
            row,
            format!("The verb in \"{}\" agrees with its subject.", row.1),
        )
    }

    const SUBJUNCTIVE: [Row; 4] = [
        ("a wish", "I wish I were taller.", ["I wish I was taller.", "I wish I am taller.", "I wish I be taller."]),
        (
            "a hypothetical",
            "If I were rich, I would travel the world.",
            ["If I was rich, I would travel the world.", "If I am rich, I would travel the world.", "If I be rich, I travel the world."],
        ),
        (
            "a demand",
            "The coach insists that he be on time.",
            ["The coach insists that he is on time.", "The coach insists that he was on time.", "The coach insists that he being on time."],
        ),
        (
            "a recommendation",
            "It is vital that she attend the meeting.",
            ["It is vital that she attends the meeting.", "It is vital that she attended the meeting.", "It is vital that she attending the meeting."],
        ),
    ];

    pub fn subjunctive(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &SUBJUNCTIVE);
        from_row(
            format!("Which sentence uses the subjunctive mood correctly to express {}?", row.0),
            row,
            format!("\"{}\" uses the subjunctive form of the verb.", row.1),
        )
    }

    /// `(sentence, subordinate clause, distractors)`
    const CLAUSES: [Row; 5] = [
        ("Although it rained, we played outside.", "Although it rained", ["we played outside", "played outside", "we played"]),
        ("She smiled because she won the race.", "because she won the race", ["She smiled", "she won", "the race"]),
        ("When the bell rang, the students left.", "When the bell rang", ["the students left", "the bell", "students left"]),
        ("The book that I borrowed is overdue.", "that I borrowed", ["The book", "is overdue", "The book is overdue"]),
        ("We will wait until the storm passes.", "until the storm passes", ["We will wait", "the storm", "We will"]),
    ];

    pub fn subordinate_clause(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let row = pick(rng, &CLAUSES);
        from_row(
            format!("Identify the subordinate clause in: \"{}\"", row.0),
            row,
            format!("\"{}\" cannot stand alone as a sentence.", row.1),
        )
    }
}

mod reading
{
    use super::*;

    struct Passage
    {
        text: &'static str,
        main_idea: &'static str,
        idea_distractors: [&'static str; 3],
        about: &'static str,
        inference: &'static str,
        inference_distractors: [&'static str; 3],
        purpose: &'static str,
    }

    const PURPOSES: [&str; 4] = [
        "To inform readers about a topic",
        "To persuade readers to act",
        "To entertain readers with a story",
        "To explain how to do something",
    ];

    const PASSAGES: [Passage; 6] = [
        Passage {
            text: "Honeybees carry pollen from flower to flower as they gather nectar. This helps plants make seeds and fruit. Without bees, many crops that people eat would be much harder to grow.",
            main_idea: "Bees help plants and crops grow by carrying pollen.",
            idea_distractors: ["Honey is the sweetest food.", "Flowers grow best in the shade.", "People should stay away from bees."],
            about: "farmers",
            inference: "Farmers depend on bees for many crops.",
            inference_distractors: ["Farmers do not like bees.", "Farmers grow crops without flowers.", "Farmers only grow flowers."],
            purpose: PURPOSES[0],
        },
        Passage {
            text: "Every night for forty years, Mr. Alvarez climbed the winding stairs of the lighthouse to light the lamp. Ships passing the rocky coast trusted his light to guide them home.",
            main_idea: "Mr. Alvarez faithfully kept the lighthouse lamp burning for ships.",
            idea_distractors: ["Ships never sail at night.", "The stairs were hard to build.", "Rocky coasts are good for swimming."],
            about: "Mr. Alvarez",
            inference: "He took his duty seriously.",
            inference_distractors: ["He was afraid of ships.", "He rarely visited the lighthouse.", "He wanted to move away from the sea."],
            purpose: PURPOSES[2],
        },
        Passage {
            text: "Every family should recycle paper, glass, and plastic. Recycling keeps waste out of landfills and saves resources. If each of us does a little, together we can make a big difference.",
            main_idea: "Families should recycle to reduce waste.",
            idea_distractors: ["Glass is stronger than plastic.", "Landfills are good places to visit.", "Paper is made from plastic."],
            about: "the writer",
            inference: "The writer believes small actions add up.",
            inference_distractors: ["The writer does not recycle.", "The writer wants more landfills.", "The writer thinks recycling is too hard."],
            purpose: PURPOSES[1],
        },
        Passage {
            text: "First, fold a sheet of paper in half along its length. Next, fold the top corners down to the center line. Finally, fold the sides down to form wings, and your plane is ready to fly.",
            main_idea: "The passage gives steps for making a paper airplane.",
            idea_distractors: ["Paper comes in many colors.", "Real planes are made of paper.", "Folding paper is always difficult."],
            about: "the reader",
            inference: "The reader needs a sheet of paper to begin.",
            inference_distractors: ["The reader must buy a real plane.", "The reader needs scissors and glue.", "The reader should skip the first step."],
            purpose: PURPOSES[3],
        },
        Passage {
            text: "Camels can travel for days across hot deserts without drinking water. Their wide feet keep them from sinking into the sand, and their humps store fat for energy.",
            main_idea: "Camels have features that help them survive in deserts.",
            idea_distractors: ["Deserts are full of fresh water.", "Camels prefer cold mountains.", "Sand is too soft for any animal."],
            about: "camels",
            inference: "Camels are well suited to desert travel.",
            inference_distractors: ["Camels cannot walk on sand.", "Camels need water every hour.", "Camels store water in their feet."],
            purpose: PURPOSES[0],
        },
        Passage {
            text: "Maya reached the library just as the doors were closing. She pressed her face to the glass, and the librarian, smiling, turned the key and let her in to return the book she had promised to bring back.",
            main_idea: "A kind librarian lets Maya in to return her book.",
            idea_distractors: ["The library is closed forever.", "Maya lost her library card.", "The librarian refuses to help."],
            about: "the librarian",
            inference: "The librarian is kind and understanding.",
            inference_distractors: ["The librarian is angry with Maya.", "The librarian did not see Maya.", "The librarian wanted to leave early."],
            purpose: PURPOSES[2],
        },
    ];

    fn listed(items: &[&'static str; 3]) -> Vec<String>
    {
        items
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn main_idea(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let p = pick(rng, &PASSAGES);
        Draft::new(
            format!("Read the passage: \"{}\" What is the main idea of the passage?", p.text),
            p.main_idea.to_string(),
            listed(&p.idea_distractors),
            |k| format!("None of these ({k})"),
            format!("Every sentence supports the point that {}", p.main_idea.to_lowercase()),
        )
    }

    pub fn inference(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let p = pick(rng, &PASSAGES);
        Draft::new(
            format!("Read the passage: \"{}\" What can you infer about {}?", p.text, p.about),
            p.inference.to_string(),
            listed(&p.inference_distractors),
            |k| format!("None of these ({k})"),
            "The details in the passage support this conclusion even though it is not stated directly."
                .to_string(),
        )
    }

    pub fn author_purpose(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let p = pick(rng, &PASSAGES);
        Draft::new(
            format!("Read the passage: \"{}\" What is the author's purpose?", p.text),
            p.purpose.to_string(),
            shuffled_others(rng, &PURPOSES, p.purpose),
            |k| format!("None of these ({k})"),
            format!("The passage is written mainly {}.", p.purpose.to_lowercase()),
        )
    }

    /// `(sentence, word, meaning, distractors)`
    const VOCABULARY: [(&str, &str, &str, [&str; 3]); 6] = [
        ("The ancient castle stood on the hill for a thousand years.", "ancient", "very old", ["very new", "very tall", "very cold"]),
        ("The enormous whale swam past the boat.", "enormous", "very large", ["very fast", "very small", "very loud"]),
        ("She gave a brief speech before lunch.", "brief", "short", ["loud", "boring", "long"]),
        ("The timid kitten hid under the bed.", "timid", "shy", ["brave", "hungry", "sleepy"]),
        ("The soup was scalding, so he waited before eating.", "scalding", "very hot", ["very salty", "very cold", "very thick"]),
        ("The hikers were weary after the long climb.", "weary", "tired", ["excited", "lost", "cheerful"]),
    ];

    pub fn vocabulary(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (sentence, word, meaning, wrong) = *pick(rng, &VOCABULARY);
        Draft::new(
            format!("In the sentence \"{sentence}\", what does the word \"{word}\" most nearly mean in this context?"),
            meaning.to_string(),
            wrong
                .iter()
                .map(|s| s.to_string()),
            |k| format!("None of these ({k})"),
            format!("Context clues show that \"{word}\" means \"{meaning}\"."),
        )
    }
}

mod thinking
{
    use super::*;

    pub fn number_pattern(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let a = rng.random_range(1..=10 * band.level());
        let d = rng.random_range(2..=3 + band.level());
        let next = a + 4 * d;
        Draft::numeric(
            format!("Complete the pattern: {}, {}, {}, {}, ?", a, a + d, a + 2 * d, a + 3 * d),
            next,
            &[next + 1, next - 1, a + 5 * d],
            "",
            format!("The pattern adds {d} each time, so the next number is {next}"),
        )
    }

    pub fn square_pattern(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let o = rng.random_range(0..=5 * band.level());
        Draft::numeric(
            format!("Which number comes next: {}, {}, {}, {}, ?", 1 + o, 4 + o, 9 + o, 16 + o),
            25 + o,
            &[20 + o, 24 + o, 32 + o],
            "",
            format!("The terms are the square numbers plus {o}, so the next is 25 + {o} = {}", 25 + o),
        )
    }

    fn letter(i: i64) -> String
    {
        char::from(b'A' + i.rem_euclid(26) as u8).to_string()
    }

    pub fn letter_sequence(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let s = rng.random_range(0..=5_i64);
        let t = rng.random_range(2..=4_i64);
        let answer = s + 4 * t;
        Draft::new(
            format!(
                "What is the next letter in the sequence: {}, {}, {}, {}, ?",
                letter(s),
                letter(s + t),
                letter(s + 2 * t),
                letter(s + 3 * t)
            ),
            letter(answer),
            [letter(answer + 1), letter(answer - 1), letter(answer + t)],
            |k| letter(answer + 1 + k),
            format!("Each letter skips ahead {t} places, so the next letter is {}", letter(answer)),
        )
    }

    /// `(plural class, plural superclass, name, singular class, singular superclass)`
    const SYLLOGISMS: [(&str, &str, &str, &str, &str); 5] = [
        ("bloops", "razzies", "Zib", "bloop", "razzie"),
        ("cats", "mammals", "Tom", "cat", "mammal"),
        ("robins", "birds", "Pip", "robin", "bird"),
        ("violins", "instruments", "Viola", "violin", "instrument"),
        ("gleeps", "norts", "Kiko", "gleep", "nort"),
    ];

    pub fn syllogism(
        rng: &mut dyn RngCore,
        _band: GradeBand,
    ) -> Draft
    {
        let (class, sup, name, one, one_sup) = *pick(rng, &SYLLOGISMS);
        Draft::new(
            format!("If all {class} are {sup}, and {name} is a {one}, what can we conclude?"),
            format!("{name} is a {one_sup}."),
            [
                format!("{name} is not a {one_sup}."),
                format!("All {sup} are {class}."),
                format!("{name} is not a {one}."),
            ],
            |k| format!("Nothing can be concluded ({k})"),
            format!("Every {one} is a {one_sup}, and {name} is a {one}, so {name} is a {one_sup}."),
        )
    }

    pub fn snail(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let up = rng.random_range(3..=5_i64);
        let down = rng.random_range(1..up);
        let height = rng.random_range(up + 4..=up + 4 + 4 * band.level());
        let net = up - down;
        // Last day's climb needs no slide back
        let days = (height - up + net - 1) / net + 1;
        Draft::numeric(
            format!(
                "A snail climbs {up} m up a {height} m wall each day and slides back {down} m each night. How many days does it take to reach the top?"
            ),
            days,
            &[days + 1, days - 1, height / net],
            "",
            format!(
                "The snail gains {net} m per full day; after {} days it is within {up} m of the top and climbs out on day {days}",
                days - 1
            ),
        )
    }

    pub fn round_robin(
        rng: &mut dyn RngCore,
        band: GradeBand,
    ) -> Draft
    {
        let n = rng.random_range(4..=6 + 2 * band.level());
        let games = n * (n - 1) / 2;
        Draft::numeric(
            format!(
                "In a round-robin tournament with {n} teams, each team plays every other team exactly once. How many games are played in total?"
            ),
            games,
            &[n * (n - 1), n * n, games + n],
            "",
            format!("Each pair plays once: {n} × {} ÷ 2 = {games}", n - 1),
        )
    }
}
