//! The `Animation` trait driven by a render loop.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Animation>`.

use crate::error::FlowError;
use crate::frame::Frame;
use crate::surface::Surface;
use serde_json::Value;

/// Something that advances one frame and paints itself.
///
/// A render loop calls [`step`](Animation::step) once per display refresh,
/// after it has applied its own trail fade to the surface.
pub trait Animation {
    /// Advance by one frame, reading pointer and bounds from `frame`, and
    /// paint the result onto `surface`.
    fn step(&mut self, frame: &Frame, surface: &mut dyn Surface) -> Result<(), FlowError>;

    /// Number of agents the animation owns.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed constants the animation runs with, as a JSON object.
    fn params(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::frame::Bounds;
    use crate::surface::RecordingSurface;
    use serde_json::json;

    /// Minimal animation used to verify trait object safety.
    struct MockAnimation {
        steps: usize,
    }

    impl Animation for MockAnimation {
        fn step(&mut self, frame: &Frame, surface: &mut dyn Surface) -> Result<(), FlowError> {
            self.steps += 1;
            surface.fill_circle(
                frame.pointer.x,
                frame.pointer.y,
                1.0,
                Rgba::new(255, 255, 255, 1.0).into(),
            );
            Ok(())
        }

        fn len(&self) -> usize {
            self.steps
        }

        fn params(&self) -> Value {
            json!({"steps": self.steps})
        }
    }

    fn frame() -> Frame {
        Frame::new(Bounds::new(10.0, 10.0).unwrap())
    }

    #[test]
    fn animation_trait_is_object_safe() {
        let mut anim: Box<dyn Animation> = Box::new(MockAnimation { steps: 0 });
        let mut surface = RecordingSurface::new(10.0, 10.0);
        anim.step(&frame(), &mut surface).unwrap();
        assert_eq!(anim.len(), 1);
        assert_eq!(surface.commands().len(), 1);
    }

    #[test]
    fn default_is_empty_follows_len() {
        let anim = MockAnimation { steps: 0 };
        assert!(anim.is_empty());
        let anim = MockAnimation { steps: 3 };
        assert!(!anim.is_empty());
    }

    #[test]
    fn params_reflects_state() {
        let mut anim = MockAnimation { steps: 0 };
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let surface_ref: &mut dyn Surface = &mut surface;
        anim.step(&frame(), surface_ref).unwrap();
        assert_eq!(anim.params()["steps"], 1);
    }
}
