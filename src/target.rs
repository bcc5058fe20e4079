//! Render target set and routing.
//!
//! The pipeline only ever references framebuffers symbolically, through the
//! closed [`RenderTargetId`] set. A static table describes each target's
//! attachments and which target its contents flow into when presented:
//!
//! ```text
//! World              -> Output
//! Outline            -> PostprocessOutline
//! PostprocessOutline -> Output
//! PingPong           -> Output
//! Output             -> None   (terminal: swap to screen)
//! ```
//!
//! Presenting a multisampled target resolves it into its successor; a
//! single-sampled target is blitted with a plain framebuffer copy. The
//! backend owns the actual framebuffer objects.

use bitflags::bitflags;

bitflags! {
    /// Attachments and sampling mode a target owns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TargetFlags: u32 {
        /// Color attachment.
        const COLOR = 1 << 0;
        /// Depth attachment.
        const DEPTH = 1 << 1;
        /// Stencil attachment.
        const STENCIL = 1 << 2;
        /// Multisampled; presenting requires an antialiasing resolve.
        const MULTISAMPLED = 1 << 3;
    }
}

/// Symbolic name of a framebuffer owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderTargetId {
    /// Normal shaded scene geometry.
    World,
    /// Outlined geometry rendered flat, input to the jump flood.
    Outline,
    /// Jump-flood working and result texture.
    PostprocessOutline,
    /// Scratch target for separable kernel passes.
    PingPong,
    /// The composited frame; presenting it swaps to screen.
    Output,
    /// Terminal marker: not a framebuffer.
    None,
}

/// Static description of one render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    /// Attachments and sampling mode.
    pub flags: TargetFlags,
    /// The target a present operation flows into.
    pub successor: RenderTargetId,
}

impl RenderTargetId {
    /// All real targets, excluding the terminal `None` marker.
    pub const ALL: [RenderTargetId; 5] = [
        Self::World,
        Self::Outline,
        Self::PostprocessOutline,
        Self::PingPong,
        Self::Output,
    ];

    /// Static attachment and routing table.
    pub fn info(self) -> TargetInfo {
        match self {
            Self::World => TargetInfo {
                flags: TargetFlags::COLOR | TargetFlags::DEPTH | TargetFlags::MULTISAMPLED,
                successor: Self::Output,
            },
            Self::Outline => TargetInfo {
                flags: TargetFlags::COLOR | TargetFlags::DEPTH | TargetFlags::MULTISAMPLED,
                successor: Self::PostprocessOutline,
            },
            Self::PostprocessOutline => TargetInfo {
                flags: TargetFlags::COLOR,
                successor: Self::Output,
            },
            Self::PingPong => TargetInfo {
                flags: TargetFlags::COLOR,
                successor: Self::Output,
            },
            Self::Output => TargetInfo {
                flags: TargetFlags::COLOR,
                successor: Self::None,
            },
            Self::None => TargetInfo {
                flags: TargetFlags::empty(),
                successor: Self::None,
            },
        }
    }

    /// The target this one flows into when presented.
    #[inline]
    pub fn successor(self) -> RenderTargetId {
        self.info().successor
    }

    /// Whether presenting this target requires a multisample resolve.
    #[inline]
    pub fn is_multisampled(self) -> bool {
        self.info().flags.contains(TargetFlags::MULTISAMPLED)
    }

    /// Whether this is the terminal marker.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Self::None
    }

    /// Number of present hops from this target to the terminal marker.
    ///
    /// The routing table is acyclic by construction; the hop bound equals
    /// the number of real targets.
    pub fn hops_to_terminal(self) -> usize {
        let mut current = self;
        let mut hops = 0;
        while !current.is_terminal() {
            current = current.successor();
            hops += 1;
            assert!(
                hops <= Self::ALL.len(),
                "render target routing table contains a cycle at {current:?}"
            );
        }
        hops
    }

    /// Fixed ordering offset for present commands within the
    /// push-render-targets sort band.
    ///
    /// World composites onto Output first, the outline result overlays it,
    /// and Output itself presents last.
    pub fn present_order(self) -> f32 {
        match self {
            Self::World => 0.0,
            Self::Outline => 1.0,
            Self::PingPong => 2.0,
            Self::PostprocessOutline => 3.0,
            Self::Output => 4.0,
            Self::None => 5.0,
        }
    }
}
