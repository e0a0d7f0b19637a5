//! Synthetic MPEG-4 clips for decoder and end-to-end tests.

use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video;
use ffmpeg_next::{codec, encoder, Dictionary, Packet, Rational};

use crate::shared::frame::{Frame, CHANNELS};

pub struct TestVideo {
    pub width: u32,
    pub height: u32,
    pub frames: usize,
    pub fps: i32,
}

impl TestVideo {
    pub fn new(width: u32, height: u32, frames: usize) -> Self {
        Self {
            width,
            height,
            frames,
            fps: 25,
        }
    }
}

/// Encodes `spec.frames` BGR frames produced by `draw` into `path`.
pub fn write_test_video(path: &Path, spec: &TestVideo, draw: impl Fn(usize) -> Frame) {
    ffmpeg_next::init().unwrap();

    let mut octx = ffmpeg_next::format::output(path).unwrap();
    let global_header = octx
        .format()
        .flags()
        .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

    let mpeg4 = encoder::find(codec::Id::MPEG4).unwrap();
    let mut ost = octx.add_stream(Some(mpeg4)).unwrap();

    let mut encoder_ctx = codec::context::Context::new_with_codec(mpeg4)
        .encoder()
        .video()
        .unwrap();
    encoder_ctx.set_width(spec.width);
    encoder_ctx.set_height(spec.height);
    encoder_ctx.set_format(Pixel::YUV420P);
    encoder_ctx.set_time_base(Rational(1, spec.fps));
    encoder_ctx.set_frame_rate(Some(Rational(spec.fps, 1)));
    encoder_ctx.set_bit_rate(2_000_000);
    if global_header {
        encoder_ctx.set_flags(codec::Flags::GLOBAL_HEADER);
    }

    let mut video_encoder = encoder_ctx.open_with(Dictionary::new()).unwrap();
    ost.set_parameters(&video_encoder);
    octx.write_header().unwrap();
    let ost_time_base = octx.stream(0).unwrap().time_base();

    let mut scaler = scaling::Context::get(
        Pixel::BGR24,
        spec.width,
        spec.height,
        Pixel::YUV420P,
        spec.width,
        spec.height,
        scaling::Flags::BILINEAR,
    )
    .unwrap();

    let row_len = spec.width as usize * CHANNELS;
    for index in 0..spec.frames {
        let frame = draw(index);
        let mut bgr = Video::new(Pixel::BGR24, spec.width, spec.height);
        let stride = bgr.stride(0);
        let plane = bgr.data_mut(0);
        for (row, src) in frame.data().chunks_exact(row_len).enumerate() {
            plane[row * stride..row * stride + row_len].copy_from_slice(src);
        }

        let mut yuv = Video::empty();
        scaler.run(&bgr, &mut yuv).unwrap();
        yuv.set_pts(Some(index as i64));

        video_encoder.send_frame(&yuv).unwrap();
        let mut encoded = Packet::empty();
        while video_encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(0);
            encoded.rescale_ts(Rational(1, spec.fps), ost_time_base);
            encoded.write_interleaved(&mut octx).unwrap();
        }
    }

    video_encoder.send_eof().unwrap();
    let mut encoded = Packet::empty();
    while video_encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(0);
        encoded.rescale_ts(Rational(1, spec.fps), ost_time_base);
        encoded.write_interleaved(&mut octx).unwrap();
    }
    octx.write_trailer().unwrap();
}
