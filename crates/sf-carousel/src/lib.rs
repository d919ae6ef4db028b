//! sf-carousel: Circular card carousel
//!
//! A fixed set of cards shown one at a time, advanced by an autoplay
//! timer, swipe/drag gestures, or explicit selection. Hovering the host
//! section pauses autoplay; manual selection restarts it after a short
//! settle delay so the timer never races a user's navigation.

mod carousel;

pub use carousel::{Carousel, CarouselChange, CarouselView};
