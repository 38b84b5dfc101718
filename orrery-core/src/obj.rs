/// Wavefront OBJ parser for the subset the renderer consumes
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    bytes::complete::take_till,
    character::complete::{char, i64 as parse_i64, multispace1},
    combinator::opt,
    multi::many1,
    number::complete::double,
    sequence::preceded,
    IResult,
};
use thiserror::Error;

use crate::geometry::{Face, Mesh};

/// Errors from reading or parsing an OBJ file.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("line {line}: malformed vertex record")]
    MalformedVertex { line: usize },
    #[error("line {line}: malformed face record")]
    MalformedFace { line: usize },
    #[error("line {line}: face needs at least 3 vertex references")]
    ShortFace { line: usize },
    #[error("line {line}: vertex reference {index} is out of range")]
    IndexOutOfRange { line: usize, index: i64 },
    #[error("failed to read OBJ file: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and parse an OBJ file from disk.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    parse_obj(&fs::read_to_string(path)?)
}

/// Parse OBJ text. `v` and `f` records build the mesh; comments and
/// every other keyword (vt, vn, o, g, s, usemtl, ...) are skipped.
///
/// Face corners may be written `i`, `i/t`, `i/t/n` or `i//n`; only the
/// leading vertex index is used, converted from the format's 1-based
/// counting. Vertex records must precede the faces that reference them.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        match text.split_whitespace().next() {
            Some("v") => {
                let (_, vertex) =
                    parse_vertex_line(text).map_err(|_| ObjError::MalformedVertex { line })?;
                vertices.push(vertex);
            }
            Some("f") => {
                let (_, references) =
                    parse_face_line(text).map_err(|_| ObjError::MalformedFace { line })?;
                if references.len() < 3 {
                    return Err(ObjError::ShortFace { line });
                }
                let mut face = Face::with_capacity(references.len());
                for index in references {
                    if index < 1 || index as usize > vertices.len() {
                        return Err(ObjError::IndexOutOfRange { line, index });
                    }
                    face.push(index as usize - 1);
                }
                faces.push(face);
            }
            _ => {}
        }
    }

    Ok(Mesh::new(vertices, faces))
}

fn parse_vertex_line(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = char('v')(input)?;
    let (input, x) = preceded(multispace1, double)(input)?;
    let (input, y) = preceded(multispace1, double)(input)?;
    let (input, z) = preceded(multispace1, double)(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_face_line(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = char('f')(input)?;
    many1(preceded(multispace1, parse_reference))(input)
}

/// One face corner: the vertex index, with any `/texture/normal` tail
/// consumed and dropped.
fn parse_reference(input: &str) -> IResult<&str, i64> {
    let (input, index) = parse_i64(input)?;
    let (input, _) = opt(preceded(
        char('/'),
        take_till(|c: char| c.is_whitespace()),
    ))(input)?;
    Ok((input, index))
}
