use crate::exercise::{Exercise, JointTriple};
use crate::geometry;
use crate::pose::{BodyPart, Capture, Frame};

/// 反復の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// しきい値より上（立位・腕を伸ばした状態）
    Standing,
    /// しきい値より下で反復中
    InRep,
}

/// シグナル角度のしきい値で反復を切り出すステートマシン
///
/// しきい値未満で InRep に入り、その間の最小角度のフレームを保存する。
/// しきい値を上回ったら反復を確定して保存フレームを返す。
/// しきい値ちょうどのフレームでは遷移しない。
pub struct RepetitionSegmenter {
    threshold: f64,
    joints: [JointTriple; 2],
    capture_parts: &'static [BodyPart],
    phase: Phase,
    extremal_angle: f64,
    current: Option<Capture>,
    frame_index: usize,
    count: usize,
}

impl RepetitionSegmenter {
    pub fn new(exercise: Exercise, threshold: f64) -> Self {
        Self {
            threshold,
            joints: exercise.signal_joints(),
            capture_parts: exercise.capture_parts(),
            phase: Phase::Standing,
            extremal_angle: threshold,
            current: None,
            frame_index: 0,
            count: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 確定した反復数
    pub fn count(&self) -> usize {
        self.count
    }

    /// 左右の関節角度の小さい方
    pub fn signal_angle(&self, frame: &Frame) -> f64 {
        let [left, right] = self.joints;
        let joint_angle = |(a, b, c): JointTriple| {
            geometry::angle(frame.get(a).point(), frame.get(b).point(), frame.get(c).point())
        };
        joint_angle(left).min(joint_angle(right))
    }

    /// 1フレーム処理する
    ///
    /// `None` は姿勢推定に失敗したフレームで、状態は変わらない。
    /// 反復が確定したときだけその最下点の Capture を返す。
    pub fn push(&mut self, frame: Option<&Frame>) -> Option<Capture> {
        let index = self.frame_index;
        self.frame_index += 1;

        let frame = frame?;
        let signal = self.signal_angle(frame);

        if signal < self.threshold {
            if self.phase == Phase::Standing {
                self.phase = Phase::InRep;
            }
            if signal < self.extremal_angle {
                self.extremal_angle = signal;
                self.current = Some(Capture::from_frame(frame, self.capture_parts, signal, index));
            }
            None
        } else if signal > self.threshold && self.phase == Phase::InRep {
            self.phase = Phase::Standing;
            self.count += 1;
            self.extremal_angle = signal;
            self.current.take()
        } else {
            None
        }
    }

    /// ストリーム終了。未確定の反復は捨てる
    pub fn finish(&mut self) {
        if self.phase == Phase::InRep {
            tracing::debug!(
                extremal_angle = self.extremal_angle,
                "discarding unfinished repetition at end of stream"
            );
        }
        self.phase = Phase::Standing;
        self.extremal_angle = self.threshold;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{BodyPart, Landmark};

    /// 両側の信号関節が `degrees` になるフレームを作る
    fn frame_with_angle(exercise: Exercise, degrees: f64) -> Frame {
        let mut frame = Frame::default();
        let r = 0.2;
        for (i, (a, b, c)) in exercise.signal_joints().into_iter().enumerate() {
            let vertex = [0.3 + 0.4 * i as f64, 0.5];
            let theta = degrees.to_radians();
            frame = frame
                .with(a, Landmark::new(vertex[0] + r, vertex[1], 0.9))
                .with(b, Landmark::new(vertex[0], vertex[1], 0.9))
                .with(c, Landmark::new(vertex[0] + r * theta.cos(), vertex[1] + r * theta.sin(), 0.9));
        }
        frame
    }

    fn run(exercise: Exercise, threshold: f64, angles: &[f64]) -> (RepetitionSegmenter, Vec<Capture>) {
        let mut seg = RepetitionSegmenter::new(exercise, threshold);
        let captures = angles
            .iter()
            .filter_map(|&a| seg.push(Some(&frame_with_angle(exercise, a))))
            .collect();
        (seg, captures)
    }

    #[test]
    fn test_signal_angle_uses_smaller_side() {
        let seg = RepetitionSegmenter::new(Exercise::Squat, 130.0);
        let frame = frame_with_angle(Exercise::Squat, 150.0);
        assert!((seg.signal_angle(&frame) - 150.0).abs() < 1e-9);

        // 右膝だけ曲げる
        let frame = frame.with(
            BodyPart::RightAnkle,
            Landmark::new(0.7 + 0.2 * 90f64.to_radians().cos(), 0.5 + 0.2, 0.9),
        );
        assert!((seg.signal_angle(&frame) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_squat_captures_bottom() {
        let angles = [140.0, 120.0, 100.0, 80.0, 60.0, 80.0, 100.0, 120.0, 140.0];
        let (seg, captures) = run(Exercise::Squat, 130.0, &angles);
        assert_eq!(seg.count(), 1);
        assert_eq!(captures.len(), 1);
        assert!((captures[0].signal_angle - 60.0).abs() < 1e-9);
        assert_eq!(captures[0].frame_index, 4);
        assert_eq!(seg.phase(), Phase::Standing);
    }

    #[test]
    fn test_multiple_reps_and_trailing_discard() {
        let angles = [
            150.0, 110.0, 90.0, 140.0, // rep 1, bottom 90
            120.0, 70.0, 95.0, 135.0, // rep 2, bottom 70
            100.0, 60.0, // open
        ];
        let (mut seg, captures) = run(Exercise::Squat, 130.0, &angles);
        assert_eq!(seg.count(), 2);
        assert_eq!(captures.len(), 2);
        assert!((captures[0].signal_angle - 90.0).abs() < 1e-9);
        assert!((captures[1].signal_angle - 70.0).abs() < 1e-9);
        assert_eq!(seg.phase(), Phase::InRep);
        seg.finish();
        assert_eq!(seg.count(), 2);
        assert_eq!(seg.phase(), Phase::Standing);
    }

    #[test]
    fn test_tie_keeps_first_frame() {
        let angles = [140.0, 80.0, 80.0, 140.0];
        let (_, captures) = run(Exercise::PushUp, 100.0, &angles);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].frame_index, 1);
    }

    #[test]
    fn test_threshold_is_dead_zone() {
        // しきい値ちょうどでは入りも出もしない
        let at = frame_with_angle(Exercise::Squat, 130.0);
        let threshold = RepetitionSegmenter::new(Exercise::Squat, 0.0).signal_angle(&at);
        let mut seg = RepetitionSegmenter::new(Exercise::Squat, threshold);

        assert!(seg.push(Some(&at)).is_none());
        assert_eq!(seg.phase(), Phase::Standing);
        assert!(seg.push(Some(&frame_with_angle(Exercise::Squat, 120.0))).is_none());
        assert!(seg.push(Some(&at)).is_none());
        assert!(seg.push(Some(&at)).is_none());
        assert_eq!(seg.phase(), Phase::InRep);
        assert!(seg.push(Some(&frame_with_angle(Exercise::Squat, 125.0))).is_none());

        let capture = seg.push(Some(&frame_with_angle(Exercise::Squat, 131.0))).unwrap();
        assert_eq!(seg.count(), 1);
        assert!((capture.signal_angle - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_frames_are_skipped() {
        let mut seg = RepetitionSegmenter::new(Exercise::Squat, 130.0);
        assert!(seg.push(Some(&frame_with_angle(Exercise::Squat, 90.0))).is_none());
        assert!(seg.push(None).is_none());
        assert_eq!(seg.phase(), Phase::InRep);
        let capture = seg.push(Some(&frame_with_angle(Exercise::Squat, 150.0))).unwrap();
        assert_eq!(capture.frame_index, 0);
        assert_eq!(seg.count(), 1);
    }

    #[test]
    fn test_extremal_resets_to_exit_angle() {
        // 2回目の反復は、前回の最小角より浅くても保存される
        let angles = [60.0, 140.0, 110.0, 135.0];
        let (_, captures) = run(Exercise::Squat, 130.0, &angles);
        assert_eq!(captures.len(), 2);
        assert!((captures[1].signal_angle - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stream() {
        let (mut seg, captures) = run(Exercise::PushUp, 100.0, &[]);
        assert!(captures.is_empty());
        seg.finish();
        assert_eq!(seg.count(), 0);
    }
}
