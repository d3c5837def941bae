//! Fluent builder pattern for constructing test data.

use chrono::{DateTime, NaiveDate, Utc};
use exam_grading_domain::scores::Section1A;
use exam_grading_domain::{
    rubric::RUBRIC, CentreId, DetailedScores, ExamPaper, ExamPaperId, ExamPaperStatus, Score,
    Section, Submission, SubmissionId, SubmissionStatus, UserId,
};

/// Mutable slot for a rubric item, looked up by section and wire key
pub fn item_slot<'a>(
    scores: &'a mut DetailedScores,
    section: Section,
    key: &str,
) -> Option<&'a mut Score> {
    let slot = match (section, key) {
        (Section::Section1A, "item1") => &mut scores.section_1a.item1,
        (Section::Section1A, "item2") => &mut scores.section_1a.item2,
        (Section::Section1A, "item3") => &mut scores.section_1a.item3,
        (Section::Section1A, "item4") => &mut scores.section_1a.item4,
        (Section::Section1A, "item5") => &mut scores.section_1a.item5,
        (Section::Section1B, "opinion") => &mut scores.section_1b.opinion,
        (Section::Section1B, "arguments") => &mut scores.section_1b.arguments,
        (Section::Section1B, "development") => &mut scores.section_1b.development,
        (Section::Section1B, "application") => &mut scores.section_1b.application,
        (Section::Section1B, "conclusion") => &mut scores.section_1b.conclusion,
        (Section::Section1B, "connectors") => &mut scores.section_1b.connectors,
        (Section::Section1B, "language") => &mut scores.section_1b.language,
        (Section::Section1B, "spelling") => &mut scores.section_1b.spelling,
        (Section::Section1B, "formatting") => &mut scores.section_1b.formatting,
        (Section::Section1B, "wordCount") => &mut scores.section_1b.word_count,
        (Section::Section2, "content") => &mut scores.section2.content,
        (Section::Section2, "composition") => &mut scores.section2.composition,
        (Section::Section3, "characters") => &mut scores.section3.characters,
        (Section::Section3, "relationships") => &mut scores.section3.relationships,
        (Section::Section3, "analysis") => &mut scores.section3.analysis,
        (Section::Section3, "composition") => &mut scores.section3.composition,
        _ => return None,
    };
    Some(slot)
}

/// Builder for creating DetailedScores test instances
#[derive(Clone, Default)]
pub struct DetailedScoresBuilder {
    scores: DetailedScores,
}

impl DetailedScoresBuilder {
    /// Start from a blank paper (every item at zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record
    pub fn from_scores(scores: DetailedScores) -> Self {
        Self { scores }
    }

    /// Start with every item at its rubric maximum
    pub fn full_marks() -> Self {
        let mut builder = Self::new();
        for item in RUBRIC.iter() {
            builder = builder.with_item(item.section, item.key, item.max);
        }
        builder
    }

    /// Set one item by section and wire key.
    ///
    /// Panics on an unknown key so typos fail the test loudly.
    pub fn with_item(mut self, section: Section, key: &str, value: Score) -> Self {
        match item_slot(&mut self.scores, section, key) {
            Some(slot) => *slot = value,
            None => panic!("unknown rubric item {}.{}", section.key(), key),
        }
        self
    }

    /// Set every item of section I.A
    pub fn with_section_1a(mut self, values: [Score; 5]) -> Self {
        let [item1, item2, item3, item4, item5] = values;
        self.scores.section_1a = Section1A {
            item1,
            item2,
            item3,
            item4,
            item5,
        };
        self
    }

    /// Set every item in the rubric to `value`
    pub fn with_all(mut self, value: Score) -> Self {
        for item in RUBRIC.iter() {
            self = self.with_item(item.section, item.key, value);
        }
        self
    }

    pub fn build(self) -> DetailedScores {
        self.scores
    }
}

/// Builder for creating Submission test instances
#[derive(Clone)]
pub struct SubmissionBuilder {
    id: SubmissionId,
    student_id: UserId,
    exam_paper_id: ExamPaperId,
    file_ref: String,
    status: SubmissionStatus,
    submitted_at: DateTime<Utc>,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self {
            id: SubmissionId::new(),
            student_id: UserId::new(),
            exam_paper_id: ExamPaperId::new(),
            file_ref: "uploads/exam-paper.pdf".to_string(),
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    pub fn with_student(mut self, student_id: UserId) -> Self {
        self.student_id = student_id;
        self
    }

    pub fn for_exam_paper(mut self, exam_paper_id: ExamPaperId) -> Self {
        self.exam_paper_id = exam_paper_id;
        self
    }

    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }

    pub fn graded(self) -> Self {
        self.with_status(SubmissionStatus::Graded)
    }

    pub fn build(self) -> Submission {
        Submission {
            id: self.id,
            student_id: self.student_id,
            exam_paper_id: self.exam_paper_id,
            file_ref: self.file_ref,
            status: self.status,
            submitted_at: self.submitted_at,
        }
    }
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating ExamPaper test instances
#[derive(Clone)]
pub struct ExamPaperBuilder {
    paper: ExamPaper,
}

impl ExamPaperBuilder {
    /// A scheduled Romanian paper in the summer session
    pub fn new(centre_id: CentreId) -> Self {
        Self {
            paper: ExamPaper {
                id: ExamPaperId::new(),
                centre_id,
                session_id: "bac-2025-summer".to_string(),
                subject_code: "ROM".to_string(),
                subject_name: "Romanian Language and Literature".to_string(),
                exam_date: NaiveDate::from_ymd_opt(2025, 6, 23).expect("valid exam date"),
                duration_minutes: 180,
                total_points: 100,
                status: ExamPaperStatus::Scheduled,
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.paper.session_id = session_id.into();
        self
    }

    pub fn with_subject(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.paper.subject_code = code.into();
        self.paper.subject_name = name.into();
        self
    }

    pub fn on(mut self, exam_date: NaiveDate) -> Self {
        self.paper.exam_date = exam_date;
        self
    }

    pub fn with_status(mut self, status: ExamPaperStatus) -> Self {
        self.paper.status = status;
        self
    }

    pub fn build(self) -> ExamPaper {
        self.paper
    }
}
