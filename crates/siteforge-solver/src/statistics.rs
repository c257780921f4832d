//! Search statistics collection and reporting.
//!
//! Workers count locally per chunk and fold the totals into a shared
//! [`StatisticsCollector`] once per chunk. Counters use relaxed atomics;
//! they never influence the search result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counts gathered by one worker over one chunk of the candidate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkCounts {
    /// Candidates drawn from the generator.
    pub generated: u64,
    /// Candidates that passed the feasibility filter.
    pub feasible: u64,
    /// Objective evaluations performed.
    pub evaluated: u64,
    /// Offers that replaced the incumbent.
    pub improvements: u64,
}

/// Complete statistics for a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Total time spent searching.
    pub duration: Duration,
    /// Candidates drawn from the generator.
    pub candidates_generated: u64,
    /// Candidates that passed the feasibility filter.
    pub feasible_candidates: u64,
    /// Objective evaluations performed.
    pub evaluations: u64,
    /// Number of times the incumbent was replaced.
    pub improvements: u64,
    /// Worker threads used.
    pub thread_count: usize,
    /// Candidate indices per unit of work.
    pub chunk_size: u64,
}

impl SearchStatistics {
    /// Returns the candidate generation rate.
    pub fn candidates_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.candidates_generated as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the share of generated candidates that were feasible.
    pub fn feasible_ratio(&self) -> f64 {
        if self.candidates_generated == 0 {
            0.0
        } else {
            self.feasible_candidates as f64 / self.candidates_generated as f64
        }
    }
}

/// Thread-safe collector for search statistics.
///
/// Use this to record statistics during the search. Afterwards, call
/// [`into_statistics`](Self::into_statistics) to get the final
/// [`SearchStatistics`].
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    candidates_generated: AtomicU64,
    feasible_candidates: AtomicU64,
    evaluations: AtomicU64,
    improvements: AtomicU64,
}

impl StatisticsCollector {
    /// Creates a new collector. The start time is recorded when this is called.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            candidates_generated: AtomicU64::new(0),
            feasible_candidates: AtomicU64::new(0),
            evaluations: AtomicU64::new(0),
            improvements: AtomicU64::new(0),
        }
    }

    /// Adds one chunk's worth of counts.
    pub fn record_chunk(&self, counts: &ChunkCounts) {
        self.candidates_generated
            .fetch_add(counts.generated, Ordering::Relaxed);
        self.feasible_candidates
            .fetch_add(counts.feasible, Ordering::Relaxed);
        self.evaluations
            .fetch_add(counts.evaluated, Ordering::Relaxed);
        self.improvements
            .fetch_add(counts.improvements, Ordering::Relaxed);
    }

    /// Returns the candidates generated so far.
    pub fn current_candidates_generated(&self) -> u64 {
        self.candidates_generated.load(Ordering::Relaxed)
    }

    /// Returns the time since the collector was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finalizes the collected counts.
    pub fn into_statistics(self, thread_count: usize, chunk_size: u64) -> SearchStatistics {
        SearchStatistics {
            duration: self.start_time.elapsed(),
            candidates_generated: self.candidates_generated.into_inner(),
            feasible_candidates: self.feasible_candidates.into_inner(),
            evaluations: self.evaluations.into_inner(),
            improvements: self.improvements.into_inner(),
            thread_count,
            chunk_size,
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_chunk() {
        let collector = StatisticsCollector::new();
        collector.record_chunk(&ChunkCounts {
            generated: 16,
            feasible: 6,
            evaluated: 6,
            improvements: 2,
        });
        collector.record_chunk(&ChunkCounts {
            generated: 16,
            feasible: 0,
            evaluated: 0,
            improvements: 0,
        });

        assert_eq!(collector.current_candidates_generated(), 32);

        let stats = collector.into_statistics(2, 16);
        assert_eq!(stats.candidates_generated, 32);
        assert_eq!(stats.feasible_candidates, 6);
        assert_eq!(stats.evaluations, 6);
        assert_eq!(stats.improvements, 2);
        assert_eq!(stats.thread_count, 2);
        assert_eq!(stats.chunk_size, 16);
        assert!((stats.feasible_ratio() - 6.0 / 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collector_thread_safety() {
        let collector = StatisticsCollector::new();

        rayon::scope(|s| {
            for _ in 0..4 {
                s.spawn(|_| {
                    for _ in 0..1000 {
                        collector.record_chunk(&ChunkCounts {
                            generated: 2,
                            feasible: 1,
                            evaluated: 1,
                            improvements: 0,
                        });
                    }
                });
            }
        });

        let stats = collector.into_statistics(4, 2);
        assert_eq!(stats.candidates_generated, 8000);
        assert_eq!(stats.feasible_candidates, 4000);
    }

    #[test]
    fn test_empty_rates() {
        let stats = StatisticsCollector::new().into_statistics(1, 1);
        assert_eq!(stats.feasible_ratio(), 0.0);
        assert!(stats.candidates_per_second() >= 0.0);
    }
}
