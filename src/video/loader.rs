use anyhow::{anyhow, bail, Result};
use image::imageops::FilterType;
use image::RgbImage;
use ndarray::Array4;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// An ordered sequence of decoded frames, shape (frame, height, width, channel),
/// RGB order, values normalized into [0, 1].
pub type FrameSequence = Array4<f32>;

/// Sequential access to the frames of one video. `read_frame` yields `None`
/// at normal end of stream; `release` must be callable more than once.
pub trait FrameDecoder {
    fn read_frame(&mut self) -> Result<Option<RgbImage>>;
    fn release(&mut self);
}

/// Decodes a video container by streaming raw RGB frames out of an ffmpeg
/// child process, one native-resolution frame per read.
pub struct FfmpegDecoder {
    child: Option<Child>,
    width: u32,
    height: u32,
}

impl FfmpegDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Video file does not exist: {}", path.display());
        }

        let (width, height) = probe_dimensions(path)?;
        log::debug!("Opening {} ({}x{})", path.display(), width, height);

        let child = Command::new("ffmpeg")
            .arg("-i")
            .arg(path)
            .args([
                "-f", "rawvideo",   // Raw video output
                "-pix_fmt", "rgb24", // RGB channel order
                "-v", "quiet",
                "-",                // Output to stdout
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| anyhow!("Failed to spawn ffmpeg: {}", e))?;

        Ok(Self {
            child: Some(child),
            width,
            height,
        })
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        let frame_size = (self.width * self.height * 3) as usize;

        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };
        let stdout = child
            .stdout
            .as_mut()
            .ok_or_else(|| anyhow!("Decoder stdout is closed"))?;

        // read_exact would conflate clean EOF with a truncated frame, so fill
        // the buffer manually and check how far we got.
        let mut frame_data = vec![0u8; frame_size];
        let mut filled = 0;
        while filled < frame_size {
            let read = stdout.read(&mut frame_data[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }

        if filled == 0 {
            return Ok(None); // Normal end of stream
        }
        if filled < frame_size {
            bail!("Truncated frame: got {} of {} bytes", filled, frame_size);
        }

        let frame = RgbImage::from_raw(self.width, self.height, frame_data)
            .ok_or_else(|| anyhow!("Frame buffer does not match {}x{}", self.width, self.height))?;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if let Some(mut process) = self.child.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reads the native frame dimensions of the first video stream via ffprobe.
fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()?;

    if !output.status.success() {
        bail!("Not a decodable video container: {}", path.display());
    }

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let streams = json["streams"]
        .as_array()
        .ok_or_else(|| anyhow!("No streams found in {}", path.display()))?;
    let video_stream = streams
        .iter()
        .find(|s| s["codec_type"] == "video")
        .ok_or_else(|| anyhow!("No video stream found in {}", path.display()))?;

    let width = video_stream["width"]
        .as_u64()
        .ok_or_else(|| anyhow!("Video stream has no width"))? as u32;
    let height = video_stream["height"]
        .as_u64()
        .ok_or_else(|| anyhow!("Video stream has no height"))? as u32;

    Ok((width, height))
}

/// Loads a video into a normalized frame tensor. Frames are resized to
/// `target_size` and collected until the stream ends or `max_frames` is
/// reached (`max_frames == 0` means no limit). Fails only when the file
/// cannot be opened as a video; a decode failure mid-stream yields the
/// frames collected so far.
pub fn load(path: &Path, max_frames: usize, target_size: (u32, u32)) -> Result<FrameSequence> {
    let decoder = FfmpegDecoder::open(path)?;
    Ok(load_with_decoder(decoder, max_frames, target_size))
}

pub fn load_with_decoder<D: FrameDecoder>(
    mut decoder: D,
    max_frames: usize,
    target_size: (u32, u32),
) -> FrameSequence {
    let (width, height) = target_size;
    let mut frames: Vec<RgbImage> = Vec::new();

    loop {
        match decoder.read_frame() {
            Ok(Some(frame)) => {
                let resized = image::imageops::resize(&frame, width, height, FilterType::Triangle);
                frames.push(resized);

                if max_frames > 0 && frames.len() == max_frames {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("Error loading video: {}", e);
                break;
            }
        }
    }

    decoder.release();
    log::debug!("Decoded {} frames", frames.len());
    frames_to_array(&frames, target_size)
}

fn frames_to_array(frames: &[RgbImage], (width, height): (u32, u32)) -> FrameSequence {
    let mut array = Array4::zeros((frames.len(), height as usize, width as usize, 3));
    for (i, frame) in frames.iter().enumerate() {
        for (x, y, pixel) in frame.enumerate_pixels() {
            for channel in 0..3 {
                array[[i, y as usize, x as usize, channel]] = pixel[channel] as f32 / 255.0;
            }
        }
    }
    array
}
