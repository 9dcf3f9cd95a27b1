//! Coarse reasoning-pattern classification ("question type").
//!
//! An ordered table of keyword rules over normalized content; the first rule
//! that matches wins, anything unmatched is [`QuestionType::Other`]. This is a
//! heuristic used to spot over-concentration of one pattern in a file, not a
//! correctness oracle.

use std::fmt;

use serde::Serialize;

use crate::core::normalize::{NormalizedKey, normalize};

/// Closed set of question types plus `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType
{
    // Math
    Quadratic,
    SystemOfEquations,
    CalculusDerivative,
    CalculusIntegral,
    Limit,
    Matrix,
    Trigonometry,
    Logarithm,
    Exponential,
    PolynomialFactoring,
    Statistics,
    Probability,
    Slope,
    Geometry,
    FunctionEvaluation,
    LinearEquation,
    Ratio,
    Percentage,
    FractionDecimal,
    Measurement,
    WordProblem,
    Multiplication,
    Division,
    Addition,
    Subtraction,

    // English
    Synonym,
    Antonym,
    PastTense,
    Spelling,
    PartsOfSpeech,
    Punctuation,
    LiteraryDevice,
    SubordinateClause,
    SubjunctiveMood,
    Agreement,

    // Reading
    MainIdea,
    Inference,
    AuthorPurpose,
    VocabularyInContext,

    // Thinking skills
    PatternCompletion,
    LetterSequence,
    Syllogism,
    SnailProblem,
    TournamentProblem,

    Other,
}

impl QuestionType
{
    pub fn as_str(self) -> &'static str
    {
        use QuestionType::*;
        match self
        {
            Quadratic => "quadratic",
            SystemOfEquations => "system-of-equations",
            CalculusDerivative => "calculus-derivative",
            CalculusIntegral => "calculus-integral",
            Limit => "limit",
            Matrix => "matrix",
            Trigonometry => "trigonometry",
            Logarithm => "logarithm",
            Exponential => "exponential",
            PolynomialFactoring => "polynomial-factoring",
            Statistics => "statistics",
            Probability => "probability",
            Slope => "slope",
            Geometry => "geometry",
            FunctionEvaluation => "function-evaluation",
            LinearEquation => "linear-equation",
            Ratio => "ratio",
            Percentage => "percentage",
            FractionDecimal => "fraction-decimal",
            Measurement => "measurement",
            WordProblem => "word-problem",
            Multiplication => "multiplication",
            Division => "division",
            Addition => "addition",
            Subtraction => "subtraction",
            Synonym => "synonym",
            Antonym => "antonym",
            PastTense => "past-tense",
            Spelling => "spelling",
            PartsOfSpeech => "parts-of-speech",
            Punctuation => "punctuation",
            LiteraryDevice => "literary-device",
            SubordinateClause => "subordinate-clause",
            SubjunctiveMood => "subjunctive-mood",
            Agreement => "agreement",
            MainIdea => "main-idea",
            Inference => "inference",
            AuthorPurpose => "author-purpose",
            VocabularyInContext => "vocabulary-in-context",
            PatternCompletion => "pattern-completion",
            LetterSequence => "letter-sequence",
            Syllogism => "syllogism",
            SnailProblem => "snail-problem",
            TournamentProblem => "tournament-problem",
            Other => "other",
        }
    }

    /// `Other` is a catch-all, not a reasoning pattern, so it never counts
    /// toward over-concentration.
    pub fn is_concentratable(self) -> bool
    {
        self != QuestionType::Other
    }
}

impl fmt::Display for QuestionType
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

/// One keyword rule. Every group must contribute at least one substring hit,
/// and no `exclude` substring may appear.
#[derive(Debug, Clone)]
pub struct Rule
{
    pub label: QuestionType,
    pub groups: Vec<Vec<&'static str>>,
    pub exclude: Vec<&'static str>,
}

impl Rule
{
    pub fn any(
        label: QuestionType,
        needles: &[&'static str],
    ) -> Self
    {
        Self { label, groups: vec![needles.to_vec()], exclude: Vec::new() }
    }

    /// Require one hit from each group.
    pub fn all(
        label: QuestionType,
        groups: &[&[&'static str]],
    ) -> Self
    {
        Self {
            label,
            groups: groups
                .iter()
                .map(|g| g.to_vec())
                .collect(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(
        mut self,
        needles: &[&'static str],
    ) -> Self
    {
        self.exclude
            .extend_from_slice(needles);
        self
    }

    fn matches(
        &self,
        text: &str,
    ) -> bool
    {
        self.groups
            .iter()
            .all(|g| {
                g.iter()
                    .any(|n| text.contains(n))
            })
            && !self
                .exclude
                .iter()
                .any(|n| text.contains(n))
    }
}

/// Ordered rule table. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Classifier
{
    rules: Vec<Rule>,
}

impl Classifier
{
    pub fn new(rules: Vec<Rule>) -> Self
    {
        Self { rules }
    }

    /// Default table. Ordering matters: specific patterns precede the broad
    /// "what is" arithmetic rules at the bottom.
    pub fn builtin() -> Self
    {
        use QuestionType::*;

        let rules = vec![
            // Advanced math first; these phrases are unambiguous
            Rule::any(Quadratic, &["quadratic"]),
            Rule::all(Quadratic, &[&["solve"], &["x²", "x^2"]]),
            Rule::any(SystemOfEquations, &["system of equations", "solve the system", "simultaneous"]),
            Rule::any(CalculusDerivative, &["derivative", "d/dx", "differentiate"]),
            Rule::any(CalculusIntegral, &["integral", "∫", "integrate"]),
            Rule::any(Limit, &["lim(", "limit of"]),
            Rule::any(Matrix, &["determinant", "matrix", "matrices"]),
            Rule::any(Trigonometry, &["sin(", "cos(", "tan(", "sine of", "cosine", "trigonometr"]),
            Rule::any(Logarithm, &["log(", "log₂", "log₁₀", "logarithm", "ln("]),
            Rule::any(Exponential, &["exponential", "^x", "ˣ", "compound interest"]),
            Rule::any(PolynomialFactoring, &["factor:", "factorise", "factorize", "factor the", "fully factor"]),
            Rule::any(Statistics, &["the mean of", "median", "the mode of", "average of", "standard deviation"]),
            Rule::any(Probability, &["probability", "chance of"]),
            Rule::any(Slope, &["slope", "gradient of the line"]),
            Rule::any(Geometry, &["area", "perimeter", "circumference", "volume", "hypotenuse", "angle"]),
            Rule::any(FunctionEvaluation, &["f(x)", "g(x)"]),
            Rule::any(LinearEquation, &["solve for x", "solve for y", "find the value of x"]).excluding(&["x²"]),
            Rule::any(Ratio, &["the ratio", "ratio of"]),
            Rule::any(Percentage, &["%", "percent"]),
            Rule::any(FractionDecimal, &["decimal", "fraction"]),
            // English
            Rule::any(Synonym, &["synonym"]),
            Rule::any(Antonym, &["antonym", "opposite of"]),
            Rule::any(PastTense, &["past tense"]),
            Rule::any(Spelling, &["spelling", "spelled correctly"]),
            Rule::any(
                PartsOfSpeech,
                &[
                    "which word is a noun",
                    "which word is a verb",
                    "which word is an adjective",
                    "which word is an adverb",
                    "part of speech",
                ],
            ),
            Rule::any(Punctuation, &["punctuat"]),
            Rule::any(LiteraryDevice, &["literary device", "figure of speech"]),
            Rule::any(SubordinateClause, &["subordinate clause", "dependent clause"]),
            Rule::any(SubjunctiveMood, &["subjunctive"]),
            Rule::any(Agreement, &["agreement"]),
            // Reading
            Rule::any(MainIdea, &["main idea", "main topic", "best summarizes"]),
            Rule::any(Inference, &["infer"]),
            Rule::any(AuthorPurpose, &["author's purpose", "author’s purpose", "purpose of the author"]),
            Rule::any(VocabularyInContext, &["in this context", "most nearly mean"]),
            // Thinking skills
            Rule::any(LetterSequence, &["next letter"]),
            Rule::any(PatternCompletion, &["complete the pattern", "comes next", "next number"]),
            Rule::any(Syllogism, &["what can we conclude", "which conclusion", "if all"]),
            Rule::any(SnailProblem, &["snail"]),
            Rule::any(TournamentProblem, &["tournament"]),
            // Broad arithmetic last
            Rule::all(Measurement, &[&["how many"], &[" are in ", " in one "]]),
            Rule::any(WordProblem, &["how many", "how much"]),
            Rule::all(Multiplication, &[&["what is", "calculate", "compute"], &["×"]]),
            Rule::all(Division, &[&["what is", "calculate", "compute"], &["÷"]]),
            Rule::all(Addition, &[&["what is", "calculate", "compute"], &["+"]]),
            Rule::all(Subtraction, &[&["what is", "calculate", "compute"], &[" - ", "−"]]),
        ];

        Self::new(rules)
    }

    pub fn classify(
        &self,
        key: &NormalizedKey,
    ) -> QuestionType
    {
        let text = key.as_str();
        self.rules
            .iter()
            .find(|r| r.matches(text))
            .map(|r| r.label)
            .unwrap_or(QuestionType::Other)
    }

    /// Normalize raw content, then classify.
    pub fn classify_content(
        &self,
        content: &str,
    ) -> QuestionType
    {
        self.classify(&normalize(content))
    }
}

impl Default for Classifier
{
    fn default() -> Self
    {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests
{
    use super::QuestionType::*;
    use super::*;

    fn c(s: &str) -> QuestionType
    {
        Classifier::builtin().classify_content(s)
    }

    #[test]
    fn representative_math_cases()
    {
        assert_eq!(c("Find the determinant of the matrix [[1, 2], [3, 4]]"), Matrix);
        assert_eq!(c("What is sin(30°)?"), Trigonometry);
        assert_eq!(c("Solve x² + 5x + 6 = 0"), Quadratic);
        assert_eq!(c("Solve the quadratic: x² -3x +2 = 0"), Quadratic);
        assert_eq!(c("Solve the system: x + y = 5, x - y = 1"), SystemOfEquations);
        assert_eq!(c("Solve for x: 3x + 4 = 19"), LinearEquation);
        assert_eq!(c("Find the derivative of f(x) = 3x² + 2x"), CalculusDerivative);
        assert_eq!(c("What is log₂(32)?"), Logarithm);
        assert_eq!(c("Factor: x² + 5x + 6"), PolynomialFactoring);
        assert_eq!(c("What is 20% of 80?"), Percentage);
        assert_eq!(c("What is 7 × 8?"), Multiplication);
        assert_eq!(c("What is 56 ÷ 8?"), Division);
        assert_eq!(c("What is 12 + 30?"), Addition);
        assert_eq!(c("What is 40 - 17?"), Subtraction);
        assert_eq!(c("A rectangle has length 5 cm and width 3 cm. What is its area?"), Geometry);
    }

    #[test]
    fn representative_language_cases()
    {
        assert_eq!(c("Which word is a synonym for \"happy\"?"), Synonym);
        assert_eq!(c("What is the past tense of \"run\"?"), PastTense);
        assert_eq!(c("Which sentence uses the subjunctive mood correctly?"), SubjunctiveMood);
        assert_eq!(c("What is the main idea of the passage?"), MainIdea);
        assert_eq!(c("Complete the pattern: 2, 4, 6, 8, ?"), PatternCompletion);
        assert_eq!(c("What is the next letter in the sequence: A, D, G, J, ?"), LetterSequence);
    }

    #[test]
    fn first_matching_rule_wins()
    {
        // Mentions both a quadratic and a system; the quadratic rule is earlier
        assert_eq!(c("Solve the system where y = x² and y = 4"), Quadratic);
    }

    #[test]
    fn unmatched_is_other()
    {
        assert_eq!(c("Name the capital of France."), Other);
        assert!(!Other.is_concentratable());
        assert!(Quadratic.is_concentratable());
    }

    #[test]
    fn custom_tables_are_respected()
    {
        let table = Classifier::new(vec![Rule::any(Matrix, &["grid"])]);
        assert_eq!(table.classify_content("Count the grid squares"), Matrix);
        assert_eq!(table.classify_content("What is sin(30°)?"), Other);
    }
}
