//! The built-in classifier.
//!
//! Weights are synthesized from a table of magic-byte signatures rather than
//! shipped as an opaque file. Every signature becomes one hidden unit whose
//! one-hot weights count matching bytes at fixed offsets; the unit's bias
//! makes it fire (activation 1) only when every byte matches. Two further
//! units read the token histogram: one responds to printable text, one to
//! input with no content at all.
//!
//! The synthesized weights are serialized once per process into the regular
//! blob format, so sessions load the built-in model through the same parser
//! and validation as a model file.

use once_cell::sync::Lazy;

use super::weights::{DenseLayer, ModelWeights, input_width};
use crate::common::error::Result;
use crate::features::{FeatureLayout, PADDING_TOKEN, VOCAB_SIZE};
use crate::labels::{self, DIRECTORY, EMPTY, TXT, UNKNOWN};

/// Leading tokens encoded positionally by the built-in model.
pub const PROBE_LEN: usize = 16;

const SIGNATURE_BASE_GAIN: f32 = 14.0;
const SIGNATURE_BYTE_GAIN: f32 = 1.0;
const TEXT_GAIN: f32 = 20.0;
const EMPTY_GAIN: f32 = 20.0;
const UNKNOWN_BIAS: f32 = 2.0;

/// Byte pattern made of one or more fixed-offset pieces.
struct Signature {
    label: &'static str,
    pieces: &'static [(usize, &'static [u8])],
}

impl Signature {
    fn byte_len(&self) -> usize {
        self.pieces.iter().map(|(_, bytes)| bytes.len()).sum()
    }
}

const fn sig(label: &'static str, pieces: &'static [(usize, &'static [u8])]) -> Signature {
    Signature { label, pieces }
}

static SIGNATURES: &[Signature] = &[
    sig("png", &[(0, b"\x89PN")]),
    sig("jpeg", &[(0, b"\xFF\xD8\xFF")]),
    sig("gif", &[(0, b"GIF87a")]),
    sig("gif", &[(0, b"GIF89a")]),
    sig("bmp", &[(0, b"BM"), (6, b"\0\0\0\0")]),
    sig("webp", &[(0, b"RIFF"), (8, b"WEBP")]),
    sig("tiff", &[(0, b"II*\0")]),
    sig("tiff", &[(0, b"MM\0*")]),
    sig("ico", &[(0, b"\0\0\x01\0")]),
    sig("pdf", &[(0, b"%PDF-")]),
    sig("sqlite", &[(0, b"SQLite format 3\0")]),
    sig("zip", &[(0, b"PK\x03\x04")]),
    sig("gzip", &[(0, b"\x1F\x8B\x08")]),
    sig("bzip", &[(0, b"BZh")]),
    sig("xz", &[(0, b"\xFD7zXZ\0")]),
    sig("7zip", &[(0, b"7z\xBC\xAF\x27\x1C")]),
    sig("rar", &[(0, b"Rar!\x1A\x07")]),
    sig("zstd", &[(0, b"\x28\xB5\x2F\xFD")]),
    sig("elf", &[(0, b"\x7FELF")]),
    // DOS stub headers; a bare "MZ" also starts plenty of text.
    sig("pebin", &[(0, b"MZ\x90\0")]),
    sig("pebin", &[(0, b"MZP\0")]),
    sig("macho", &[(0, b"\xFE\xED\xFA\xCE")]),
    sig("macho", &[(0, b"\xFE\xED\xFA\xCF")]),
    sig("macho", &[(0, b"\xCE\xFA\xED\xFE")]),
    sig("macho", &[(0, b"\xCF\xFA\xED\xFE")]),
    sig("javabytecode", &[(0, b"\xCA\xFE\xBA\xBE")]),
    sig("wasm", &[(0, b"\0asm")]),
    sig("mp3", &[(0, b"ID3")]),
    sig("ogg", &[(0, b"OggS")]),
    sig("flac", &[(0, b"fLaC")]),
    sig("wav", &[(0, b"RIFF"), (8, b"WAVE")]),
    sig("avi", &[(0, b"RIFF"), (8, b"AVI ")]),
    sig("mp4", &[(4, b"ftyp")]),
    sig("mkv", &[(0, b"\x1A\x45\xDF\xA3")]),
    sig("rtf", &[(0, b"{\\rtf")]),
    sig("html", &[(0, b"<!DOCTYPE html")]),
    sig("html", &[(0, b"<!doctype html")]),
    sig("html", &[(0, b"<html")]),
    sig("svg", &[(0, b"<svg")]),
    sig("php", &[(0, b"<?php")]),
    sig("xml", &[(0, b"<?xml")]),
    sig("shell", &[(0, b"#!/bin/sh")]),
    sig("shell", &[(0, b"#!/bin/bash")]),
    sig("pem", &[(0, b"-----BEGIN ")]),
    sig("json", &[(0, b"{")]),
];

/// Histogram weight of a byte for the text unit.
#[inline]
fn text_affinity(byte: u8) -> f32 {
    match byte {
        b'\t' | b'\n' | b'\r' | 0x0C | 0x20..=0x7E => 1.0,
        // Neutral so UTF-8 multibyte sequences do not count against text.
        0x80..=0xFF => 0.0,
        _ => -4.0,
    }
}

/// Labels the built-in model emits, in output-unit order.
fn output_labels() -> Vec<&'static str> {
    labels::entries()
        .into_iter()
        .map(|entry| entry.label)
        .filter(|&label| label != DIRECTORY)
        .collect()
}

/// Build the built-in weights.
pub fn synthesize() -> Result<ModelWeights> {
    let labels = output_labels();
    let label_index = |label: &str| labels.iter().position(|&l| l == label);

    let text_unit = SIGNATURES.len();
    let empty_unit = text_unit + 1;
    let hidden_units = empty_unit + 1;
    let histogram = PROBE_LEN * VOCAB_SIZE;

    let mut hidden = DenseLayer::zeros(hidden_units, input_width(PROBE_LEN));
    let mut output = DenseLayer::zeros(labels.len(), hidden_units);

    for (unit, signature) in SIGNATURES.iter().enumerate() {
        for &(offset, bytes) in signature.pieces {
            for (i, &byte) in bytes.iter().enumerate() {
                hidden.set(unit, (offset + i) * VOCAB_SIZE + usize::from(byte), 1.0);
            }
        }
        let len = signature.byte_len();
        hidden.set_bias(unit, 1.0 - len as f32);
        if let Some(row) = label_index(signature.label) {
            output.set(
                row,
                unit,
                SIGNATURE_BASE_GAIN + SIGNATURE_BYTE_GAIN * len as f32,
            );
        }
    }

    for byte in 0..=u8::MAX {
        hidden.set(text_unit, histogram + usize::from(byte), text_affinity(byte));
        hidden.set(empty_unit, histogram + usize::from(byte), -2.0);
    }
    hidden.set_bias(text_unit, -0.5);
    hidden.set(empty_unit, histogram + usize::from(PADDING_TOKEN), 1.0);

    if let Some(row) = label_index(TXT) {
        output.set(row, text_unit, TEXT_GAIN);
    }
    if let Some(row) = label_index(EMPTY) {
        output.set(row, empty_unit, EMPTY_GAIN);
    }
    if let Some(row) = label_index(UNKNOWN) {
        output.set_bias(row, UNKNOWN_BIAS);
    }

    ModelWeights::new(
        FeatureLayout::DEFAULT,
        PROBE_LEN,
        labels.into_iter().map(str::to_string).collect(),
        hidden,
        output,
    )
}

static BUILTIN_BLOB: Lazy<Vec<u8>> = Lazy::new(|| match synthesize() {
    Ok(weights) => weights.to_bytes(),
    Err(err) => {
        tracing::error!(error = %err, "built-in model synthesis failed");
        Vec::new()
    },
});

/// Serialized built-in weights; empty if synthesis failed, which the blob
/// parser reports as a load error.
pub fn blob() -> &'static [u8] {
    &BUILTIN_BLOB
}
