// Snapshots of the stack frame around a swap

use crate::memory::stack::StackFrame;
use crate::memory::value::Address;

/// Captured state of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub name: String,
    pub address: Address,
    pub type_name: &'static str,
    pub bytes: Vec<u8>,
    pub initialized: bool,
    pub rendered: String, // Decoded value, or "[uninit]"
}

/// Captured state of a whole frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub function_name: String,
    pub slots: Vec<SlotSnapshot>,
}

impl FrameSnapshot {
    /// Copy every slot of `frame`, in declaration order
    pub fn capture(frame: &StackFrame) -> Self {
        let slots = frame
            .slots()
            .map(|info| {
                let bytes = frame
                    .bytes(info.address, info.size)
                    .map(<[u8]>::to_vec)
                    .unwrap_or_default();
                let initialized = frame.region_initialized(info.address, info.size);
                let rendered = if initialized {
                    info.render(&bytes)
                } else {
                    "[uninit]".to_string()
                };
                SlotSnapshot {
                    name: info.name.clone(),
                    address: info.address,
                    type_name: info.type_name,
                    bytes,
                    initialized,
                    rendered,
                }
            })
            .collect();

        FrameSnapshot {
            function_name: frame.function_name.clone(),
            slots,
        }
    }

    /// Look up a slot by name
    pub fn slot(&self, name: &str) -> Option<&SlotSnapshot> {
        self.slots.iter().find(|s| s.name == name)
    }
}

/// Frame state immediately before and after one swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapSnapshot {
    pub cycle: usize,
    pub before: FrameSnapshot,
    pub after: FrameSnapshot,
}

impl SwapSnapshot {
    /// Whether the swap changed any byte of the frame
    pub fn changed(&self) -> bool {
        self.before
            .slots
            .iter()
            .zip(&self.after.slots)
            .any(|(b, a)| b.bytes != a.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::scratch::ScratchAllocator;
    use crate::memory::swap::swap_slots;

    #[test]
    fn test_capture_reports_bytes_and_values() {
        let mut frame = StackFrame::new("main");
        let a = frame.declare::<i32>("num1").unwrap();
        frame.declare::<i32>("num2").unwrap();
        frame.write(a, 5).unwrap();

        let snap = FrameSnapshot::capture(&frame);
        assert_eq!(snap.function_name, "main");
        assert_eq!(snap.slots.len(), 2);

        let num1 = snap.slot("num1").unwrap();
        assert_eq!(num1.bytes, vec![5, 0, 0, 0]);
        assert_eq!(num1.rendered, "5");
        assert!(num1.initialized);

        let num2 = snap.slot("num2").unwrap();
        assert!(!num2.initialized);
        assert_eq!(num2.rendered, "[uninit]");
    }

    #[test]
    fn test_swap_snapshot_detects_change() {
        let mut frame = StackFrame::new("main");
        let mut scratch = ScratchAllocator::default();
        let a = frame.declare::<i32>("num1").unwrap();
        let b = frame.declare::<i32>("num2").unwrap();
        frame.write(a, 3).unwrap();
        frame.write(b, 3).unwrap();

        let before = FrameSnapshot::capture(&frame);
        swap_slots(&mut frame, a, b, &mut scratch).unwrap();
        let same = SwapSnapshot {
            cycle: 1,
            before: before.clone(),
            after: FrameSnapshot::capture(&frame),
        };
        assert!(!same.changed());

        frame.write(a, 4).unwrap();
        swap_slots(&mut frame, a, b, &mut scratch).unwrap();
        let different = SwapSnapshot {
            cycle: 2,
            before,
            after: FrameSnapshot::capture(&frame),
        };
        assert!(different.changed());
    }
}
