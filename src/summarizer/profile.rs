//! Per-level template tables: selection budgets, vocabulary rules, and text.
//!
//! Three levels by four modes gives twelve [`ModeTemplate`]s. Per-item framing
//! lives in the renderer because it differs in shape, not just wording.

use super::{AcademicLevel, SummaryMode};

/// Whether a level rewrites advanced vocabulary before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Sentences are rendered verbatim.
    Verbatim,
    /// Advanced words are replaced with plainer ones.
    Simplified,
}

/// Static text and budgets for one mode at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTemplate {
    /// Number of top-scored sentences rendered.
    pub sentences: usize,
    /// Number of keywords in the term list (zero when the mode has none).
    pub terms: usize,
    /// Bold title line.
    pub title: &'static str,
    /// Italic line under the title, when the mode has one.
    pub subtitle: Option<&'static str>,
    /// Text that introduces the item list.
    pub intro: &'static str,
    /// Closing remark appended after the items.
    pub closing: &'static str,
}

/// Everything the renderer needs to know about an academic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProfile {
    pub level: AcademicLevel,
    pub vocabulary: Vocabulary,
    pub quick: ModeTemplate,
    pub concepts: ModeTemplate,
    pub study: ModeTemplate,
    pub exam: ModeTemplate,
}

impl LevelProfile {
    /// Returns the template for `mode`.
    #[must_use]
    pub fn template(&self, mode: SummaryMode) -> &ModeTemplate {
        match mode {
            SummaryMode::Quick => &self.quick,
            SummaryMode::Concepts => &self.concepts,
            SummaryMode::Study => &self.study,
            SummaryMode::Exam => &self.exam,
        }
    }
}

/// Looks up the profile for `level`.
#[must_use]
pub fn level_profile(level: AcademicLevel) -> &'static LevelProfile {
    match level {
        AcademicLevel::HighSchool => &HIGH_SCHOOL,
        AcademicLevel::Undergraduate => &UNDERGRADUATE,
        AcademicLevel::Graduate => &GRADUATE,
    }
}

static HIGH_SCHOOL: LevelProfile = LevelProfile {
    level: AcademicLevel::HighSchool,
    vocabulary: Vocabulary::Simplified,
    quick: ModeTemplate {
        sentences: 3,
        terms: 0,
        title: "📚 **HIGH SCHOOL QUICK SUMMARY**",
        subtitle: Some("*Hey there! Here's what you need to know:*"),
        intro: "",
        closing: "✨ **Awesome!** You got this - these are the main ideas to remember!",
    },
    concepts: ModeTemplate {
        sentences: 4,
        terms: 5,
        title: "🎯 **HIGH SCHOOL KEY CONCEPTS**",
        subtitle: Some("*Super simple explanations just for you!*"),
        intro: "explained in easy words",
        closing: "🌟 **You're doing great!** These concepts are the building blocks for understanding bigger ideas.",
    },
    study: ModeTemplate {
        sentences: 5,
        terms: 4,
        title: "📖 **HIGH SCHOOL STUDY GUIDE**",
        subtitle: None,
        intro: "**Hey friend!** Let's break this down super simply:",
        closing: "**🌟 Study Tip:** Read each point out loud and explain it in your own words like you're teaching a friend!",
    },
    exam: ModeTemplate {
        sentences: 3,
        terms: 5,
        title: "📝 **HIGH SCHOOL EXAM PREP**",
        subtitle: None,
        intro: "**Hey!** Let's practice with some easy questions to help you study:",
        closing: "**🎯 Test Tip:** Don't worry! Just remember the main ideas and you'll do great.",
    },
};

static UNDERGRADUATE: LevelProfile = LevelProfile {
    level: AcademicLevel::Undergraduate,
    vocabulary: Vocabulary::Verbatim,
    quick: ModeTemplate {
        sentences: 4,
        terms: 0,
        title: "🎓 **COLLEGE-LEVEL SUMMARY**",
        subtitle: Some("*Academic Overview:*"),
        intro: "",
        closing: "💡 **Study Focus:** Review these key points and consider how they interconnect.",
    },
    concepts: ModeTemplate {
        sentences: 6,
        terms: 7,
        title: "🎓 **COLLEGE KEY CONCEPTS**",
        subtitle: Some("*Academic analysis with connections*"),
        intro: "with detailed explanations and relationships",
        closing: "💡 **Critical Thinking:** Consider how these concepts form a cohesive theoretical framework.",
    },
    study: ModeTemplate {
        sentences: 7,
        terms: 6,
        title: "🎓 **COLLEGE STUDY GUIDE**",
        subtitle: None,
        intro: "**Academic Study Guide** - Building conceptual understanding:",
        closing: "**💡 Study Tip:** Review these points multiple times and try explaining each concept in your own words!",
    },
    exam: ModeTemplate {
        sentences: 5,
        terms: 5,
        title: "📝 **COLLEGE EXAM PREPARATION**",
        subtitle: None,
        intro: "**Academic Exam Preparation** - Critical thinking practice:",
        closing: "**🎯 Study Tip:** Focus on understanding how concepts connect and apply in different situations.",
    },
};

static GRADUATE: LevelProfile = LevelProfile {
    level: AcademicLevel::Graduate,
    vocabulary: Vocabulary::Verbatim,
    quick: ModeTemplate {
        sentences: 5,
        terms: 0,
        title: "🔬 **ADVANCED SCHOLARLY SUMMARY**",
        subtitle: Some("*Critical Analysis:*"),
        intro: "",
        closing: "🔍 **Research Context:** These findings contribute to ongoing scholarly discourse in the field.",
    },
    concepts: ModeTemplate {
        sentences: 8,
        terms: 9,
        title: "🔬 **ADVANCED THEORETICAL CONCEPTS**",
        subtitle: Some("*Scholarly analysis with research implications*"),
        intro: "with theoretical frameworks and methodological considerations",
        closing: "🔭 **Research Direction:** These concepts suggest avenues for future methodological investigation.",
    },
    study: ModeTemplate {
        sentences: 9,
        terms: 8,
        title: "🔬 **ADVANCED GRADUATE STUDY GUIDE**",
        subtitle: None,
        intro: "**Scholarly Analysis Framework** - Theoretical and methodological considerations:",
        closing: "**🔍 Research Tip:** Consider how these concepts relate to current research and theoretical debates in the field.",
    },
    exam: ModeTemplate {
        sentences: 7,
        terms: 5,
        title: "📝 **ADVANCED GRADUATE EXAM PREP**",
        subtitle: None,
        intro: "**Scholarly Examination Preparation** - Theoretical and analytical questions:",
        closing: "**🎯 Research Tip:** Prepare to demonstrate deep understanding and critical analysis of theoretical frameworks.",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_budgets_match_level_tables() {
        let budgets: Vec<(usize, usize, usize, usize)> = AcademicLevel::ALL
            .iter()
            .map(|level| {
                let profile = level_profile(*level);
                (
                    profile.quick.sentences,
                    profile.concepts.sentences,
                    profile.study.sentences,
                    profile.exam.sentences,
                )
            })
            .collect();
        assert_eq!(budgets, vec![(3, 4, 5, 3), (4, 6, 7, 5), (5, 8, 9, 7)]);
    }

    #[test]
    fn test_term_budgets_match_level_tables() {
        let terms: Vec<(usize, usize, usize)> = AcademicLevel::ALL
            .iter()
            .map(|level| {
                let profile = level_profile(*level);
                (profile.concepts.terms, profile.study.terms, profile.exam.terms)
            })
            .collect();
        assert_eq!(terms, vec![(5, 4, 5), (7, 6, 5), (9, 8, 5)]);
    }

    #[test]
    fn test_only_high_school_simplifies_vocabulary() {
        assert_eq!(
            level_profile(AcademicLevel::HighSchool).vocabulary,
            Vocabulary::Simplified
        );
        assert_eq!(
            level_profile(AcademicLevel::Undergraduate).vocabulary,
            Vocabulary::Verbatim
        );
        assert_eq!(
            level_profile(AcademicLevel::Graduate).vocabulary,
            Vocabulary::Verbatim
        );
    }

    #[test]
    fn test_template_dispatches_by_mode() {
        let profile = level_profile(AcademicLevel::Graduate);
        assert_eq!(profile.template(SummaryMode::Exam).sentences, 7);
        assert!(profile.template(SummaryMode::Quick).title.contains("SCHOLARLY"));
        assert_eq!(profile.level, AcademicLevel::Graduate);
    }
}
