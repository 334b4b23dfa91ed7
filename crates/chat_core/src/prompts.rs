//! Canned questions offered as shortcuts next to the free-text input.
//!
//! Picking an entry is exactly the same as typing its question.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCategory {
    Biography,
    CorrespondenceTimeline,
    ThematicSearch,
    GlobalStatistics,
    Comparison,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 5] = [
        PromptCategory::Biography,
        PromptCategory::CorrespondenceTimeline,
        PromptCategory::ThematicSearch,
        PromptCategory::GlobalStatistics,
        PromptCategory::Comparison,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PromptCategory::Biography => "Biographie",
            PromptCategory::CorrespondenceTimeline => "Chronologie de la correspondance",
            PromptCategory::ThematicSearch => "Recherche thématique",
            PromptCategory::GlobalStatistics => "Statistiques globales",
            PromptCategory::Comparison => "Comparaison",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedPrompt {
    pub category: PromptCategory,
    pub label: &'static str,
    pub question: &'static str,
}

pub const CATALOGUE: &[CannedPrompt] = &[
    CannedPrompt {
        category: PromptCategory::Biography,
        label: "Elisabeth Müller",
        question: "Qui est Elisabeth Müller ?",
    },
    CannedPrompt {
        category: PromptCategory::Biography,
        label: "Marcel Nussbaumer",
        question: "Donne la biographie de Marcel Nussbaumer",
    },
    CannedPrompt {
        category: PromptCategory::CorrespondenceTimeline,
        label: "Parcours de Müller",
        question: "Quel est le parcours de persécution de Müller ?",
    },
    CannedPrompt {
        category: PromptCategory::CorrespondenceTimeline,
        label: "Événements de Nussbaumer",
        question: "Décris les événements de Nussbaumer dans l'ordre chronologique",
    },
    CannedPrompt {
        category: PromptCategory::ThematicSearch,
        label: "Demandes de visa",
        question: "Quels documents mentionnent des demandes de visa ?",
    },
    CannedPrompt {
        category: PromptCategory::ThematicSearch,
        label: "Homonymes de Pury",
        question: "Y a-t-il plusieurs de Pury ?",
    },
    CannedPrompt {
        category: PromptCategory::GlobalStatistics,
        label: "Personnes disponibles",
        question: "Quelles personnes sont disponibles ?",
    },
    CannedPrompt {
        category: PromptCategory::GlobalStatistics,
        label: "Sources par période",
        question: "Combien de sources datent de 1940-1945 et combien sont des reconstructions postérieures ?",
    },
    CannedPrompt {
        category: PromptCategory::Comparison,
        label: "Müller et Nussbaumer",
        question: "Compare Müller et Nussbaumer",
    },
    CannedPrompt {
        category: PromptCategory::Comparison,
        label: "Müller et de Pury",
        question: "Différences entre Müller et de Pury ?",
    },
];

/// What the user chose: free text, or the 1-based index of a catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    FreeText(String),
    Canned(usize),
}

impl Selection {
    /// `/N` selects catalogue entry N; anything else is free text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some(index) = trimmed
            .strip_prefix('/')
            .and_then(|rest| rest.parse::<usize>().ok())
        {
            return Selection::Canned(index);
        }
        Selection::FreeText(trimmed.to_string())
    }

    /// The question text to send, or `None` for an out-of-range index.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Selection::FreeText(text) => Some(text.clone()),
            Selection::Canned(index) => by_index(*index).map(|p| p.question.to_string()),
        }
    }
}

/// 1-based lookup, matching the numbering shown to the user.
pub fn by_index(index: usize) -> Option<&'static CannedPrompt> {
    index.checked_sub(1).and_then(|i| CATALOGUE.get(i))
}

/// Catalogue entries of one category, with their 1-based indices.
pub fn in_category(category: PromptCategory) -> Vec<(usize, &'static CannedPrompt)> {
    CATALOGUE
        .iter()
        .enumerate()
        .filter(|(_, p)| p.category == category)
        .map(|(i, p)| (i + 1, p))
        .collect()
}
