#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use holostitch_cloud as cloud;

#[doc(inline)]
pub use holostitch_pack as pack;

#[doc(inline)]
pub use holostitch_wire as wire;

#[doc(inline)]
pub use holostitch_stream as stream;

#[doc(inline)]
pub use holostitch_fusion as fusion;
