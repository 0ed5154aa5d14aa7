//! ブラウザのタイマー（setTimeout）による Sleeper

use std::future::Future;
use std::time::Duration;

use gloo::timers::future::TimeoutFuture;
use ingredient_lens_common::Sleeper;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
