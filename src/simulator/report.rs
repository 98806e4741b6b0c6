//! Simulation report generation.

use super::config::SimConfig;
use crate::core::error::Result;
use crate::mastery::MasteryTier;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One point of a run's time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSample {
    pub run: u32,
    pub tick: u64,
    pub game_time_s: f64,
    pub skill_level: f64,
    pub multiplier: f64,
    pub target: f64,
    pub zone_id: Option<u32>,
    pub tier: MasteryTier,
    pub deaths: u32,
}

/// Statistics collected from a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub final_skill: f64,
    pub final_multiplier: f64,
    pub final_tier: MasteryTier,
    pub avg_multiplier: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    pub deaths: u32,
    pub penalties_expired: u32,
    pub skill_updates: u32,
    pub tier_changes: u32,
    pub zone_changes: u32,
    /// Fraction of ticks spent under a death penalty.
    pub penalty_uptime: f64,
    /// Ticks spent in each tier, indexed like [`MasteryTier::ALL`].
    pub ticks_per_tier: [u64; 5],
    pub avg_enemy_hp: f64,
    pub total_exp: u64,
    /// Enrage timer a boss would get at the run's final skill level.
    pub enrage_secs: u64,
    #[serde(skip)]
    pub samples: Vec<TimeSample>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub profile: String,
    pub run_duration_secs: f64,

    pub avg_final_skill: f64,
    pub avg_final_multiplier: f64,
    pub avg_multiplier: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,

    pub avg_deaths: f64,
    pub avg_penalty_uptime: f64,
    pub avg_tier_changes: f64,
    pub avg_zone_changes: f64,
    pub avg_enemy_hp: f64,
    pub avg_total_exp: f64,
    pub avg_enrage_secs: f64,

    /// Runs that finished in each tier.
    pub final_tier_distribution: Vec<(MasteryTier, u32)>,
    /// Share of all ticks spent in each tier.
    pub tier_time_share: Vec<(MasteryTier, f64)>,

    pub death_distribution: Vec<u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

const CSV_HEADER: &str = "run,tick,game_time_s,skill_level,multiplier,target,zone_id,tier,deaths";

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;

        let final_tier_distribution = MasteryTier::ALL
            .iter()
            .map(|&tier| (tier, runs.iter().filter(|r| r.final_tier == tier).count() as u32))
            .collect();

        let total_ticks: u64 = runs.iter().flat_map(|r| r.ticks_per_tier).sum();
        let tier_time_share = MasteryTier::ALL
            .iter()
            .enumerate()
            .map(|(i, &tier)| {
                let ticks: u64 = runs.iter().map(|r| r.ticks_per_tier[i]).sum();
                (tier, ticks as f64 / total_ticks.max(1) as f64)
            })
            .collect();

        let min_multiplier = runs
            .iter()
            .map(|r| r.min_multiplier)
            .fold(f64::INFINITY, f64::min);
        let max_multiplier = runs
            .iter()
            .map(|r| r.max_multiplier)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            num_runs,
            profile: config.profile.name().to_string(),
            run_duration_secs: config.run_duration_secs(),
            avg_final_skill: mean(&runs, |r| r.final_skill),
            avg_final_multiplier: mean(&runs, |r| r.final_multiplier),
            avg_multiplier: mean(&runs, |r| r.avg_multiplier),
            min_multiplier: if runs.is_empty() { 0.0 } else { min_multiplier },
            max_multiplier: if runs.is_empty() { 0.0 } else { max_multiplier },
            avg_deaths: mean(&runs, |r| r.deaths as f64),
            avg_penalty_uptime: mean(&runs, |r| r.penalty_uptime),
            avg_tier_changes: mean(&runs, |r| r.tier_changes as f64),
            avg_zone_changes: mean(&runs, |r| r.zone_changes as f64),
            avg_enemy_hp: mean(&runs, |r| r.avg_enemy_hp),
            avg_total_exp: mean(&runs, |r| r.total_exp as f64),
            avg_enrage_secs: mean(&runs, |r| r.enrage_secs as f64),
            final_tier_distribution,
            tier_time_share,
            death_distribution: runs.iter().map(|r| r.deaths).collect(),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 DIFFICULTY SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}  |  Profile: {}  |  Game time per run: {:.0}s\n\n",
            self.num_runs, self.profile, self.run_duration_secs
        ));

        report.push_str("── SKILL & DIFFICULTY ───────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Skill:       {:.3}\n", self.avg_final_skill));
        report.push_str(&format!(
            "  Avg Final Multiplier:  {:.3}\n",
            self.avg_final_multiplier
        ));
        report.push_str(&format!("  Avg Multiplier:        {:.3}\n", self.avg_multiplier));
        report.push_str(&format!(
            "  Multiplier Range:      {:.3} - {:.3}\n\n",
            self.min_multiplier, self.max_multiplier
        ));

        report.push_str("── MASTERY ──────────────────────────────────────────────────────\n");
        report.push_str("  Tier           Final Runs   Time Share\n");
        report.push_str("  ────           ──────────   ──────────\n");
        for ((tier, finals), (_, share)) in self
            .final_tier_distribution
            .iter()
            .zip(self.tier_time_share.iter())
        {
            let bar = "█".repeat((share * 20.0) as usize);
            report.push_str(&format!(
                "  {:<13}  {:>10}   {:>8.1}% {}\n",
                tier.name(),
                finals,
                share * 100.0,
                bar
            ));
        }
        report.push_str(&format!(
            "  Avg Tier Changes:      {:.1}\n\n",
            self.avg_tier_changes
        ));

        report.push_str("── DEATHS ───────────────────────────────────────────────────────\n");
        let min_deaths = self.death_distribution.iter().min().copied().unwrap_or(0);
        let max_deaths = self.death_distribution.iter().max().copied().unwrap_or(0);
        let median_deaths = {
            let mut sorted = self.death_distribution.clone();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        report.push_str(&format!("  Avg Deaths:      {:.1}\n", self.avg_deaths));
        report.push_str(&format!(
            "  Min / Median / Max: {} / {} / {}\n",
            min_deaths, median_deaths, max_deaths
        ));
        report.push_str(&format!(
            "  Penalty Uptime:  {:.1}%\n\n",
            self.avg_penalty_uptime * 100.0
        ));

        report.push_str("── SCALING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Enemy HP:    {:.1}\n", self.avg_enemy_hp));
        report.push_str(&format!("  Avg Total XP:    {:.0}\n", self.avg_total_exp));
        report.push_str(&format!("  Avg Enrage:      {:.0}s\n", self.avg_enrage_secs));
        report.push_str(&format!("  Avg Zone Changes: {:.1}\n\n", self.avg_zone_changes));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let pressure = if self.avg_multiplier < 0.9 {
            "SOFT - Engine is mostly easing off"
        } else if self.avg_multiplier < 1.2 {
            "GOOD - Difficulty near baseline"
        } else {
            "HARD - Engine is mostly pushing back"
        };
        report.push_str(&format!("  Difficulty Pressure: {}\n", pressure));
        if self.avg_tier_changes > 10.0 {
            report.push_str("  ⚠️  Tier churn is high - smoothing too loose?\n");
        }
        if self.avg_penalty_uptime > 0.5 {
            report.push_str("  ⚠️  Penalty active most of the time - duration too long?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Writes every run's time series as CSV, one row per sample.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(file);
        writeln!(w, "{CSV_HEADER}")?;
        self.write_samples(&mut w, "")?;
        w.flush()?;
        Ok(())
    }

    fn write_samples(&self, w: &mut impl Write, prefix: &str) -> Result<()> {
        for sample in self.run_stats.iter().flat_map(|r| &r.samples) {
            writeln!(
                w,
                "{prefix}{},{},{:.1},{:.4},{:.4},{:.4},{},{},{}",
                sample.run,
                sample.tick,
                sample.game_time_s,
                sample.skill_level,
                sample.multiplier,
                sample.target,
                sample.zone_id.map(|id| id.to_string()).unwrap_or_default(),
                sample.tier,
                sample.deaths,
            )?;
        }
        Ok(())
    }

    /// Side-by-side table of one report per profile.
    pub fn comparison_text(reports: &[SimReport]) -> String {
        let mut table = String::new();

        table.push_str("═══════════════════════════════════════════════════════════════\n");
        table.push_str("                    PROFILE COMPARISON\n");
        table.push_str("═══════════════════════════════════════════════════════════════\n\n");
        table.push_str("  Profile      Skill   Final x   Avg x   Deaths   Penalty   Tier Δ\n");
        table.push_str("  ───────      ─────   ───────   ─────   ──────   ───────   ──────\n");
        for report in reports {
            table.push_str(&format!(
                "  {:<10}   {:.3}   {:>7.3}   {:.3}   {:>6.1}   {:>6.1}%   {:>6.1}\n",
                report.profile,
                report.avg_final_skill,
                report.avg_final_multiplier,
                report.avg_multiplier,
                report.avg_deaths,
                report.avg_penalty_uptime * 100.0,
                report.avg_tier_changes,
            ));
        }
        table.push('\n');

        table
    }

    /// All reports as one JSON array.
    pub fn comparison_json(reports: &[SimReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }

    /// Time series of every report in one CSV, keyed by a leading profile column.
    pub fn write_comparison_csv(reports: &[SimReport], path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(file);
        writeln!(w, "profile,{CSV_HEADER}")?;
        for report in reports {
            report.write_samples(&mut w, &format!("{},", report.profile))?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(final_tier: MasteryTier, deaths: u32) -> RunStats {
        RunStats {
            final_skill: 0.5,
            final_multiplier: 1.1,
            final_tier,
            avg_multiplier: 1.05,
            min_multiplier: 0.95,
            max_multiplier: 1.2,
            deaths,
            penalties_expired: deaths,
            skill_updates: 100,
            tier_changes: 2,
            zone_changes: 4,
            penalty_uptime: 0.1,
            ticks_per_tier: [0, 50, 50, 0, 0],
            avg_enemy_hp: 110.0,
            total_exp: 5_000,
            enrage_secs: 300,
            samples: vec![TimeSample {
                run: 0,
                tick: 0,
                game_time_s: 0.0,
                skill_level: 0.5,
                multiplier: 1.0,
                target: 1.15,
                zone_id: None,
                tier: final_tier,
                deaths: 0,
            }],
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![run(MasteryTier::Intermediate, 3), run(MasteryTier::Advanced, 5)];
        let report = SimReport::from_runs(runs, &SimConfig::default());

        assert_eq!(report.num_runs, 2);
        assert!((report.avg_deaths - 4.0).abs() < 1e-9);
        assert_eq!(report.final_tier_distribution[1], (MasteryTier::Intermediate, 1));
        assert_eq!(report.final_tier_distribution[2], (MasteryTier::Advanced, 1));
        assert!((report.tier_time_share[1].1 - 0.5).abs() < 1e-9);
        assert_eq!(report.min_multiplier, 0.95);

        let text = report.to_text();
        assert!(text.contains("DIFFICULTY SIMULATION REPORT"));
        assert!(text.contains("Intermediate"));
        assert!(report.to_json().contains("\"avg_deaths\": 4.0"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), &SimConfig::default());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.avg_final_skill, 0.0);
        assert!(!report.to_text().is_empty());
    }

    #[test]
    fn test_comparison_outputs_cover_every_report() {
        let config = SimConfig::default();
        let average = SimReport::from_runs(vec![run(MasteryTier::Intermediate, 1)], &config);
        let expert = SimReport::from_runs(
            vec![run(MasteryTier::Master, 0)],
            &SimConfig {
                profile: crate::simulator::PlayerProfile::Expert,
                ..config
            },
        );
        let reports = vec![average, expert];

        let text = SimReport::comparison_text(&reports);
        assert!(text.contains("PROFILE COMPARISON"));
        assert!(text.contains("average"));
        assert!(text.contains("expert"));

        let json: serde_json::Value = serde_json::from_str(&SimReport::comparison_json(&reports)).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["profile"], "expert");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.csv");
        SimReport::write_comparison_csv(&reports, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("profile,run,tick"));
        assert_eq!(lines[1], "average,0,0,0.0,0.5000,1.0000,1.1500,,Intermediate,0");
        assert!(lines[2].starts_with("expert,0,"));
    }

    #[test]
    fn test_csv_output() {
        let report = SimReport::from_runs(vec![run(MasteryTier::Beginner, 0)], &SimConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        report.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("run,tick"));
        assert_eq!(lines[1], "0,0,0.0,0.5000,1.0000,1.1500,,Beginner,0");
    }
}
