use std::time::Instant;

use anyhow::Result;
use tracing::warn;

use crate::ctx::Ctx;

pub mod stage0_validate;
pub mod stage1_subset;
pub mod stage2_align;
pub mod stage3_predict;
pub mod stage4_project;
pub mod stage5_output;

/// Progress narration side channel: `info` when the call asked for verbose
/// output, `debug` otherwise. Never affects computed values.
macro_rules! narrate {
    ($ctx:expr, $($t:tt)*) => {
        if $ctx.verbose {
            tracing::info!($($t)*);
        } else {
            tracing::debug!($($t)*);
        }
    };
}
pub(crate) use narrate;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            narrate!(ctx, stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            narrate!(
                ctx,
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
