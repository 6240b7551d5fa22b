//! # Grouper Module
//!
//! Clusters per-file fingerprint records into exact and near-duplicate
//! groups.
//!
//! ## Algorithm
//! Two phases over the full ordered record sequence:
//! 1. **Exact**: partition records by content digest; every digest shared by
//!    two or more records becomes one group with score 0.
//! 2. **Near**: anchor-based greedy clustering in original record order. The
//!    first unclaimed record anchors a group and absorbs every later
//!    unclaimed record within the Hamming threshold of the *anchor*.
//!
//! The near phase is single-link and deliberately **not** transitive: two
//! records can share a group purely by both being close to the anchor even if
//! they are far from each other, and a claimed record never joins or anchors
//! another group. The output is therefore a function of record order, which
//! is exactly why the batch scheduler guarantees input-order results.
//! Transitive grouping (union-find over the threshold graph) would be a
//! separate strategy, not a fix to this one.

use crate::core::fingerprint::hamming_distance;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Fingerprint record for one processed file.
///
/// Produced by a batch worker and immutable afterwards; its position in the
/// record sequence is the file's position in the original discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path of the source file (unique within a run)
    pub path: PathBuf,
    /// Content digest hex string; empty = unavailable
    pub content_hash: String,
    /// 64-bit perceptual fingerprint
    pub perceptual_hash: u64,
    /// False when decoding or thumbnail generation failed
    pub ok: bool,
}

impl ImageRecord {
    /// Create a failed record for a file that could not be processed
    pub fn failed(path: PathBuf) -> Self {
        Self {
            path,
            content_hash: String::new(),
            perceptual_hash: 0,
            ok: false,
        }
    }
}

/// How the members of a group were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    /// Members share an identical content digest
    Exact,
    /// Members are within the Hamming threshold of the group's anchor
    Near,
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKind::Exact => write!(f, "exact"),
            GroupKind::Near => write!(f, "near"),
        }
    }
}

/// A group of duplicate images.
///
/// The first member is the anchor. Groups are recomputed from scratch on
/// every run; nothing persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Member file paths, anchor first
    pub members: Vec<PathBuf>,
    /// Exact or near match
    pub kind: GroupKind,
    /// 0 for exact groups; the configured threshold for near groups
    pub score: u32,
}

impl DuplicateGroup {
    /// Every member beyond the first counts as a duplicate
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }
}

/// Total duplicates across all groups
pub fn duplicate_count(groups: &[DuplicateGroup]) -> usize {
    groups.iter().map(|g| g.duplicate_count()).sum()
}

/// Two-phase duplicate grouper
#[derive(Debug, Clone)]
pub struct DuplicateGrouper {
    threshold: u32,
}

impl DuplicateGrouper {
    /// Create a grouper with the given Hamming distance threshold
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// The configured Hamming threshold
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Group the ordered record sequence into exact and near duplicates.
    ///
    /// Deterministic: the same ordered records always yield the same group
    /// list. Failed records never enter either phase; records with an empty
    /// content digest can enter near groups but never exact ones. Unclaimed
    /// singletons are silently dropped.
    pub fn group(&self, records: &[ImageRecord]) -> Vec<DuplicateGroup> {
        let mut groups = Vec::new();
        let mut claimed = vec![false; records.len()];

        self.group_exact(records, &mut claimed, &mut groups);
        self.group_near(records, &mut claimed, &mut groups);

        groups
    }

    /// Phase 1: partition by content digest.
    ///
    /// Groups are emitted in first-seen digest order, which is deterministic
    /// over the ordered record sequence.
    fn group_exact(
        &self,
        records: &[ImageRecord],
        claimed: &mut [bool],
        groups: &mut Vec<DuplicateGroup>,
    ) {
        let mut by_digest: HashMap<&str, usize> = HashMap::new();
        let mut buckets: Vec<Vec<usize>> = Vec::new();

        for (i, record) in records.iter().enumerate() {
            if !record.ok || record.content_hash.is_empty() {
                continue;
            }

            let bucket = *by_digest
                .entry(record.content_hash.as_str())
                .or_insert_with(|| {
                    buckets.push(Vec::new());
                    buckets.len() - 1
                });
            buckets[bucket].push(i);
        }

        for bucket in buckets {
            if bucket.len() < 2 {
                continue;
            }

            for &i in &bucket {
                claimed[i] = true;
            }

            groups.push(DuplicateGroup {
                members: bucket.iter().map(|&i| records[i].path.clone()).collect(),
                kind: GroupKind::Exact,
                score: 0,
            });
        }
    }

    /// Phase 2: anchor-greedy near clustering over unclaimed records.
    fn group_near(
        &self,
        records: &[ImageRecord],
        claimed: &mut [bool],
        groups: &mut Vec<DuplicateGroup>,
    ) {
        for i in 0..records.len() {
            if claimed[i] || !records[i].ok {
                continue;
            }

            let anchor = &records[i];
            let mut members = vec![i];
            claimed[i] = true;

            for (j, candidate) in records.iter().enumerate().skip(i + 1) {
                if claimed[j] || !candidate.ok {
                    continue;
                }

                // An exact twin of the anchor must not be re-captured as
                // a near duplicate
                if !anchor.content_hash.is_empty() && candidate.content_hash == anchor.content_hash
                {
                    continue;
                }

                let distance = hamming_distance(anchor.perceptual_hash, candidate.perceptual_hash);
                if distance >= 1 && distance <= self.threshold {
                    members.push(j);
                    claimed[j] = true;
                }
            }

            // An anchor with no followers is not a duplicate group
            if members.len() < 2 {
                continue;
            }

            groups.push(DuplicateGroup {
                members: members.iter().map(|&i| records[i].path.clone()).collect(),
                kind: GroupKind::Near,
                // The configured bound, not the measured distance
                score: self.threshold,
            });
        }
    }
}
