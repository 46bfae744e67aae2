//! Mode renderers: select top sentences and fill the level templates.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::profile::{LevelProfile, ModeTemplate, Vocabulary};
use super::scorer::ScoredSentence;
use super::{AcademicLevel, SummaryMode};

#[allow(clippy::expect_used)]
static CONNECTIVE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:however|therefore|consequently|subsequently|additionally|moreover|furthermore)\b",
    )
    .expect("connective regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static USE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:utilize|implement|facilitate|leverage)\b")
        .expect("use-word regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static WAY_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:methodology|framework|paradigm|construct)\b")
        .expect("way-word regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static EMPHASIS_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:significant|substantial|considerable)\b")
        .expect("emphasis regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static COMPLEXITY_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:complex|intricate|sophisticated|advanced|methodology|framework|paradigm)\b",
    )
    .expect("complexity regex is valid") // Static pattern, safe to panic
});

const MULTIPLE_CHOICE_OPTIONS: &str =
    "A) Something really important\nB) Not important at all\nC) Kind of important\nD) Super important\n\n";

/// Renders the artifact for `mode` using the level `profile`.
#[must_use]
pub fn render(
    scored: &[ScoredSentence],
    keywords: &[String],
    mode: SummaryMode,
    profile: &LevelProfile,
) -> String {
    let template = profile.template(mode);
    let selected = select_top(scored, template.sentences);
    match mode {
        SummaryMode::Quick => render_quick(&selected, template, profile),
        SummaryMode::Concepts => render_concepts(&selected, keywords, template, profile),
        SummaryMode::Study => render_study(&selected, keywords, template, profile),
        SummaryMode::Exam => render_exam(&selected, keywords, template, profile),
    }
}

/// Picks the `count` highest-scoring sentences and restores reading order.
///
/// Equal scores keep source order.
#[must_use]
pub fn select_top(scored: &[ScoredSentence], count: usize) -> Vec<&ScoredSentence> {
    let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked.truncate(count);
    ranked.sort_by_key(|sentence| sentence.index);
    ranked
}

/// Uppercase comma-joined list of the first `count` keywords.
#[must_use]
pub fn term_list(keywords: &[String], count: usize) -> String {
    keywords
        .iter()
        .take(count)
        .map(|keyword| keyword.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Vocabulary rules used by the quick summary.
#[must_use]
pub fn simplify_for_quick(sentence: &str) -> String {
    let text = CONNECTIVE_WORDS.replace_all(sentence, "also");
    let text = USE_WORDS.replace_all(&text, "use");
    let text = WAY_WORDS.replace_all(&text, "way");
    EMPHASIS_WORDS.replace_all(&text, "important").into_owned()
}

/// Vocabulary rules used by concepts, study, and exam output.
#[must_use]
pub fn simplify_for_explanation(sentence: &str) -> String {
    let text = COMPLEXITY_WORDS.replace_all(sentence, "important way");
    EMPHASIS_WORDS
        .replace_all(&text, "really important")
        .into_owned()
}

fn explained<'a>(profile: &LevelProfile, sentence: &'a str) -> Cow<'a, str> {
    match profile.vocabulary {
        Vocabulary::Simplified => Cow::Owned(simplify_for_explanation(sentence)),
        Vocabulary::Verbatim => Cow::Borrowed(sentence),
    }
}

fn render_quick(
    selected: &[&ScoredSentence],
    template: &ModeTemplate,
    profile: &LevelProfile,
) -> String {
    let mut out = String::from(template.title);
    out.push('\n');
    if let Some(subtitle) = template.subtitle {
        out.push_str(subtitle);
    }
    out.push_str("\n\n");

    let items: Vec<String> = selected
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let n = i + 1;
            match profile.level {
                AcademicLevel::HighSchool => {
                    let text = match profile.vocabulary {
                        Vocabulary::Simplified => simplify_for_quick(&item.text),
                        Vocabulary::Verbatim => item.text.clone(),
                    };
                    format!("😊 **Key Point {n}:** {text}")
                }
                AcademicLevel::Undergraduate => format!("📖 **Point {n}:** {}", item.text),
                AcademicLevel::Graduate => format!(
                    "🎯 **Analytical Point {n}:** {}\n   *Implication:* This suggests broader theoretical connections.",
                    item.text
                ),
            }
        })
        .collect();

    out.push_str(&items.join("\n\n"));
    out.push_str("\n\n");
    out.push_str(template.closing);
    out
}

fn render_concepts(
    selected: &[&ScoredSentence],
    keywords: &[String],
    template: &ModeTemplate,
    profile: &LevelProfile,
) -> String {
    let mut out = String::from(template.title);
    out.push('\n');
    if let Some(subtitle) = template.subtitle {
        out.push_str(subtitle);
    }
    out.push_str(&format!(
        "\n\n**📝 Important Terms:** {}\n\n**Main Concepts {}:**\n\n",
        term_list(keywords, template.terms),
        template.intro
    ));

    let items: Vec<String> = selected
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let n = i + 1;
            match profile.level {
                AcademicLevel::HighSchool => format!(
                    "😊 **{n}. Super Simple:** {}\n\n",
                    explained(profile, &item.text)
                ),
                AcademicLevel::Undergraduate => format!(
                    "📖 **{n}. {}**\n   *Connection:* This relates to other concepts we've discussed.\n\n",
                    item.text
                ),
                AcademicLevel::Graduate => format!(
                    "🎯 **{n}. {}**\n   *Theoretical Framework:* This concept intersects with broader disciplinary paradigms.\n   *Research Implication:* This has methodological significance for contemporary scholarship.\n\n",
                    item.text
                ),
            }
        })
        .collect();

    out.push_str(&items.concat());
    out.push_str(template.closing);
    out
}

fn render_study(
    selected: &[&ScoredSentence],
    keywords: &[String],
    template: &ModeTemplate,
    profile: &LevelProfile,
) -> String {
    let mut out = String::from(template.title);
    out.push_str(&format!(
        "\n\n**📝 Key Terms to Master:** {}\n\n{}\n\n",
        term_list(keywords, template.terms),
        template.intro
    ));

    let items: Vec<String> = selected
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let n = i + 1;
            match profile.level {
                AcademicLevel::HighSchool => format!(
                    "😊 **Step {n} - Easy Peasy:** {}\n\n",
                    explained(profile, &item.text)
                ),
                AcademicLevel::Undergraduate => format!(
                    "📖 **Point {n}:** {}\n   *Why it matters:* This connects to other concepts in the field.\n\n",
                    item.text
                ),
                AcademicLevel::Graduate => format!(
                    "🎯 **Analytical Point {n}:** {}\n   *Theoretical Context:* This intersects with established scholarly frameworks.\n   *Methodological Note:* This has implications for research design and analysis.\n\n",
                    item.text
                ),
            }
        })
        .collect();

    out.push_str(&items.concat());
    out.push_str(template.closing);
    out
}

fn render_exam(
    selected: &[&ScoredSentence],
    keywords: &[String],
    template: &ModeTemplate,
    profile: &LevelProfile,
) -> String {
    let mut out = String::from(template.title);
    out.push_str(&format!(
        "\n\n**📚 Key Terms to Review:** {}\n\n{}\n\n",
        term_list(keywords, template.terms),
        template.intro
    ));

    let items: Vec<String> = selected
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let n = i + 1;
            match profile.level {
                AcademicLevel::HighSchool => format!(
                    "😊 **Question {n} (Multiple Choice):**\nWhat does this mean: \"{}\"?\n{MULTIPLE_CHOICE_OPTIONS}",
                    explained(profile, &item.text)
                ),
                AcademicLevel::Undergraduate => format!(
                    "📖 **Question {n} (Short Answer):**\nExplain the significance of: \"{}\"\n*Consider:* How does this connect to other concepts in the field?\n\n",
                    item.text
                ),
                AcademicLevel::Graduate => format!(
                    "🎯 **Question {n} (Essay Analysis):**\nCritically analyze: \"{}\"\n*Theoretical Framework:* How does this intersect with established scholarly paradigms?\n*Methodological Implications:* What research approaches does this suggest?\n*Critical Perspective:* What are the limitations or alternative interpretations?\n\n",
                    item.text
                ),
            }
        })
        .collect();

    out.push_str(&items.concat());
    out.push_str(template.closing);
    out
}
