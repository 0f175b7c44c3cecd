use super::{AtBatPlay, AtBatResult};

/// Counting stats for one batter. Shared by box scores and season totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattingLine {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub runs_batted_in: u32,
}

impl BattingLine {
    /// Records one plate appearance.
    pub fn record(&mut self, result: AtBatResult, play: Option<&AtBatPlay>, rbi: u32) {
        self.plate_appearances += 1;
        if result.counts_as_at_bat(play) {
            self.at_bats += 1;
        }
        match result {
            AtBatResult::Single => self.hits += 1,
            AtBatResult::Double => {
                self.hits += 1;
                self.doubles += 1;
            }
            AtBatResult::Triple => {
                self.hits += 1;
                self.triples += 1;
            }
            AtBatResult::HomeRun => {
                self.hits += 1;
                self.home_runs += 1;
            }
            AtBatResult::Walk => self.walks += 1,
            AtBatResult::Strikeout => self.strikeouts += 1,
            AtBatResult::Out => {}
        }
        self.runs_batted_in += rbi;
    }

    pub fn merge(&mut self, other: &BattingLine) {
        self.plate_appearances += other.plate_appearances;
        self.at_bats += other.at_bats;
        self.hits += other.hits;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.home_runs += other.home_runs;
        self.walks += other.walks;
        self.strikeouts += other.strikeouts;
        self.runs_batted_in += other.runs_batted_in;
    }

    /// Hits per official at-bat; 0 when there are none.
    pub fn average(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            f64::from(self.hits) / f64::from(self.at_bats)
        }
    }
}

/// Team aggregate for one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamTotals {
    pub runs: u32,
    pub hits: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs: u32,
    pub left_on_base: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_extra_base_hits() {
        let mut line = BattingLine::default();
        line.record(AtBatResult::Double, None, 1);
        line.record(AtBatResult::Walk, None, 0);
        line.record(AtBatResult::HomeRun, None, 2);
        assert_eq!(line.plate_appearances, 3);
        assert_eq!(line.at_bats, 2);
        assert_eq!(line.hits, 2);
        assert_eq!(line.doubles, 1);
        assert_eq!(line.home_runs, 1);
        assert_eq!(line.runs_batted_in, 3);
        assert!((line.average() - 1.0).abs() < 1e-12);
    }
}
