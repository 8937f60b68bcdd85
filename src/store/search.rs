// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ranking for the target-document search.

use crate::model::Document;

/// Filters `documents` to those whose name or title contains `query` (case-insensitive) and
/// orders them best match first. An empty query keeps every document, ordered by name.
pub fn rank_documents(mut documents: Vec<Document>, query: &str) -> Vec<Document> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        documents.sort_by(|a, b| a.name().cmp(b.name()));
        return documents;
    }

    let mut scored = documents
        .into_iter()
        .filter_map(|document| {
            let name = substring_score(&needle, &document.name().as_str().to_lowercase());
            let title = substring_score(&needle, &document.title().to_lowercase());
            name.max(title).map(|score| (score, document))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|(score_a, doc_a), (score_b, doc_b)| {
        score_b.cmp(score_a).then_with(|| doc_a.name().cmp(doc_b.name()))
    });
    scored.into_iter().map(|(_, document)| document).collect()
}

fn substring_score(needle: &str, haystack: &str) -> Option<i64> {
    let first = haystack.find(needle)?;
    let starts = first == 0;
    let start_boundary =
        if starts { true } else { haystack[..first].chars().last().is_some_and(is_boundary_char) };
    let occurrences = haystack.match_indices(needle).count() as i64;

    let mut score = 200_000i64.saturating_sub((first as i64) * 1000);
    score += occurrences * 200;
    score -= haystack.chars().count() as i64;
    if starts {
        score += 50_000;
    }
    if start_boundary {
        score += 20_000;
    }

    Some(score)
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, '/' | '.' | '-' | '_' | ' ')
}
