use frizbee::{Config, match_indices, match_list};
use locus_filter_api::FilterQuery;

use crate::index::FileRecord;

/// Datasets at least this large enable frizbee's prefilter.
pub const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// Number of file names scored between cancellation checks.
pub const MATCH_CHUNK_SIZE: usize = 512;

/// Builds fuzzy matching options for the provided query and dataset size.
pub fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		prefilter: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
		config.prefilter = true;
		config.max_typos = Some(allowed_typos);
	} else {
		config.max_typos = None;
	}

	config.sort = false;

	config
}

/// Matched file with its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScoredFile {
	pub index: usize,
	pub score: u16,
}

/// Score every file name against the query.
///
/// Returns `None` when the pass was cancelled part way through. The result is
/// sorted best first, ties broken by path order, and truncated to `limit`.
pub(crate) fn score_files(
	files: &[FileRecord],
	needle: &str,
	config: &Config,
	query: &FilterQuery<'_>,
	limit: usize,
) -> Option<Vec<ScoredFile>> {
	let mut scored = Vec::new();
	let mut haystacks = Vec::with_capacity(MATCH_CHUNK_SIZE);
	for (chunk_index, chunk) in files.chunks(MATCH_CHUNK_SIZE).enumerate() {
		if query.is_cancelled() {
			return None;
		}
		let offset = chunk_index * MATCH_CHUNK_SIZE;
		haystacks.clear();
		haystacks.extend(chunk.iter().map(FileRecord::name));
		for entry in match_list(needle, &haystacks, config) {
			if entry.score == 0 {
				continue;
			}
			scored.push(ScoredFile {
				index: offset + entry.index as usize,
				score: entry.score,
			});
		}
	}

	scored.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
	scored.truncate(limit);
	Some(scored)
}

/// Character positions of the matched characters inside `text`.
///
/// frizbee reports byte offsets; they are mapped to the character that
/// contains each byte.
pub(crate) fn highlight_indices(needle: &str, config: &Config, text: &str) -> Option<Vec<usize>> {
	if text.is_empty() || needle.is_empty() {
		return None;
	}
	let matched = match_indices(needle, text, config)?;
	if text.is_ascii() {
		return Some(matched.indices);
	}
	Some(
		matched
			.indices
			.into_iter()
			.map(|byte| char_position(text, byte))
			.collect(),
	)
}

fn char_position(text: &str, byte: usize) -> usize {
	text.char_indices()
		.take_while(|(offset, _)| *offset <= byte)
		.count()
		.saturating_sub(1)
}
