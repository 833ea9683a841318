// Power-On Self Test (POST) sequencer

use bios_api::{Attribute, Display, Speaker};

/// Outcome of one POST run. Exactly one value per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PostResult {
    Success = 0,
    CpuFail = 1,
    MemoryFail = 2,
    VideoFail = 3,
    KeyboardFail = 4,
    DiskFail = 5,
    CmosFail = 6,
}

impl PostResult {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == PostResult::Success
    }

    pub fn message(self) -> &'static str {
        match self {
            PostResult::Success => "POST: All tests passed",
            PostResult::CpuFail => "CPU Test Failed",
            PostResult::MemoryFail => "Memory Test Failed",
            PostResult::VideoFail => "Video Test Failed",
            PostResult::KeyboardFail => "Keyboard Test Failed",
            PostResult::DiskFail => "Disk Test Failed",
            PostResult::CmosFail => "CMOS Test Failed",
        }
    }
}

/// POST stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStage {
    Cpu,
    Memory,
    Video,
    Keyboard,
    Disk,
    Cmos,
}

impl PostStage {
    pub const ALL: [PostStage; 6] = [
        PostStage::Cpu,
        PostStage::Memory,
        PostStage::Video,
        PostStage::Keyboard,
        PostStage::Disk,
        PostStage::Cmos,
    ];

    /// Result reported when this stage fails
    pub fn failure(self) -> PostResult {
        match self {
            PostStage::Cpu => PostResult::CpuFail,
            PostStage::Memory => PostResult::MemoryFail,
            PostStage::Video => PostResult::VideoFail,
            PostStage::Keyboard => PostResult::KeyboardFail,
            PostStage::Disk => PostResult::DiskFail,
            PostStage::Cmos => PostResult::CmosFail,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PostStage::Cpu => "CPU",
            PostStage::Memory => "Memory",
            PostStage::Video => "Video",
            PostStage::Keyboard => "Keyboard",
            PostStage::Disk => "Disk",
            PostStage::Cmos => "CMOS",
        }
    }

    /// Pitch of the per-stage chirp
    pub fn chirp_hz(self) -> u32 {
        match self {
            PostStage::Cpu => 800,
            PostStage::Memory => 900,
            PostStage::Video => 1000,
            PostStage::Keyboard => 1100,
            PostStage::Disk => 1200,
            PostStage::Cmos => 1300,
        }
    }
}

pub const CHIRP_MS: u32 = 50;
pub const SUCCESS_TONES: [(u32, u32); 2] = [(1000, 100), (1500, 100)];
pub const ERROR_TONE: (u32, u32) = (300, 200);
pub const ERROR_TONE_REPEAT: usize = 3;

/// One self-check per stage. Checks must leave the hardware as they found it.
pub trait SelfTest {
    fn check(&mut self, stage: PostStage) -> bool;
}

impl<T: SelfTest + ?Sized> SelfTest for &mut T {
    fn check(&mut self, stage: PostStage) -> bool {
        (**self).check(stage)
    }
}

/// Severity of a hardware survey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    AllPassed,
    /// One component failed, system operational
    Degraded,
    /// Two or more components failed
    Critical,
}

/// Result of running every stage without stopping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyReport {
    passed: [bool; 6],
}

impl SurveyReport {
    pub fn passed(&self, stage: PostStage) -> bool {
        PostStage::ALL
            .iter()
            .position(|&s| s == stage)
            .is_some_and(|index| self.passed[index])
    }

    pub fn failures(&self) -> u8 {
        self.passed.iter().filter(|&&ok| !ok).count() as u8
    }

    pub fn severity(&self) -> Severity {
        match self.failures() {
            0 => Severity::AllPassed,
            1 => Severity::Degraded,
            _ => Severity::Critical,
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = (PostStage, bool)> + '_ {
        PostStage::ALL.iter().copied().zip(self.passed.iter().copied())
    }
}

/// Ordered, fail-fast POST.
pub struct PostSequencer<T, S> {
    tests: T,
    speaker: S,
    stage_chirps: bool,
}

impl<T: SelfTest, S: Speaker> PostSequencer<T, S> {
    pub fn new(tests: T, speaker: S) -> Self {
        Self {
            tests,
            speaker,
            stage_chirps: false,
        }
    }

    pub fn with_stage_chirps(mut self, enabled: bool) -> Self {
        self.stage_chirps = enabled;
        self
    }

    /// Run the stages in order and stop at the first failure.
    pub fn run(&mut self) -> PostResult {
        log::info!("Running POST tests...");
        for stage in PostStage::ALL {
            if !self.tests.check(stage) {
                log::error!("POST: {} FAIL", stage.name());
                return stage.failure();
            }
            log::info!("POST: {} PASS", stage.name());
            if self.stage_chirps {
                self.speaker.emit_tone(stage.chirp_hz(), CHIRP_MS);
            }
        }
        for (frequency, duration) in SUCCESS_TONES {
            self.speaker.emit_tone(frequency, duration);
        }
        PostResult::Success
    }

    /// Run every stage regardless of failures. Silent.
    pub fn survey(&mut self) -> SurveyReport {
        let mut passed = [false; 6];
        for (slot, stage) in passed.iter_mut().zip(PostStage::ALL) {
            *slot = self.tests.check(stage);
            log::info!(
                "survey: {} {}",
                stage.name(),
                if *slot { "PASSED" } else { "FAILED" }
            );
        }
        SurveyReport { passed }
    }

    pub fn into_inner(self) -> (T, S) {
        (self.tests, self.speaker)
    }
}

/// Show a fatal POST result on the first row and sound the error tones.
pub fn report_failure<D, S>(display: &mut D, speaker: &mut S, result: PostResult)
where
    D: Display + ?Sized,
    S: Speaker + ?Sized,
{
    display.draw(result.message(), 0, 0, Attribute::ALERT);
    for _ in 0..ERROR_TONE_REPEAT {
        speaker.emit_tone(ERROR_TONE.0, ERROR_TONE.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::sim::{RecordingDisplay, RecordingSpeaker};

    /// Fails the listed stages and records every call
    struct Scripted {
        failing: &'static [PostStage],
        calls: Vec<PostStage>,
    }

    impl SelfTest for Scripted {
        fn check(&mut self, stage: PostStage) -> bool {
            self.calls.push(stage);
            !self.failing.contains(&stage)
        }
    }

    fn scripted(failing: &'static [PostStage]) -> Scripted {
        Scripted {
            failing,
            calls: Vec::new(),
        }
    }

    #[test]
    fn test_all_pass_plays_success_tones() {
        let mut post = PostSequencer::new(scripted(&[]), RecordingSpeaker::new());
        assert_eq!(post.run(), PostResult::Success);
        let (tests, speaker) = post.into_inner();
        assert_eq!(tests.calls, PostStage::ALL.to_vec());
        assert_eq!(speaker.tones, vec![(1000, 100), (1500, 100)]);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let mut post = PostSequencer::new(
            scripted(&[PostStage::Video, PostStage::Disk]),
            RecordingSpeaker::new(),
        );
        assert_eq!(post.run(), PostResult::VideoFail);
        let (tests, speaker) = post.into_inner();
        assert_eq!(
            tests.calls,
            vec![PostStage::Cpu, PostStage::Memory, PostStage::Video]
        );
        assert!(speaker.tones.is_empty());
    }

    #[test]
    fn test_stage_chirps() {
        let mut post = PostSequencer::new(scripted(&[PostStage::Keyboard]), RecordingSpeaker::new())
            .with_stage_chirps(true);
        assert_eq!(post.run(), PostResult::KeyboardFail);
        let (_, speaker) = post.into_inner();
        assert_eq!(speaker.tones, vec![(800, 50), (900, 50), (1000, 50)]);
    }

    #[test]
    fn test_survey_counts_failures() {
        let mut post = PostSequencer::new(
            scripted(&[PostStage::Memory, PostStage::Cmos]),
            RecordingSpeaker::new(),
        );
        let report = post.survey();
        assert_eq!(report.failures(), 2);
        assert_eq!(report.severity(), Severity::Critical);
        assert!(!report.passed(PostStage::Memory));
        assert!(report.passed(PostStage::Disk));
        let (tests, _) = post.into_inner();
        assert_eq!(tests.calls.len(), 6);
    }

    #[test]
    fn test_report_failure() {
        let mut display = RecordingDisplay::new();
        let mut speaker = RecordingSpeaker::new();
        report_failure(&mut display, &mut speaker, PostResult::DiskFail);
        assert_eq!(display.row(0), "Disk Test Failed");
        assert_eq!(display.attr_at(0, 0), Attribute::ALERT);
        assert_eq!(speaker.tones, vec![(300, 200); 3]);
    }
}
