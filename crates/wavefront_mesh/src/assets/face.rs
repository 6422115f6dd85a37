//! Face corner token resolution
//!
//! A corner token is one of `v`, `v//vn` or `v/vt/vn`. Indices are kept
//! 1-based as written; conversion to buffer offsets happens at lookup.

use super::ObjError;

/// Reference indices of one face corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    /// 1-based position index
    pub position: usize,
    /// 1-based texture coordinate index, if present
    pub texcoord: Option<usize>,
    /// 1-based normal index, if present
    pub normal: Option<usize>,
}

impl FaceCorner {
    /// Parse a corner token found on line `line` (`content` is that line).
    pub fn parse(token: &str, line: usize, content: &str) -> Result<Self, ObjError> {
        let malformed = |reason: &'static str| ObjError::MalformedFaceToken {
            line,
            token: token.to_string(),
            reason,
        };
        let parts: Vec<&str> = token.split('/').collect();

        match parts.as_slice() {
            [position] => Ok(Self {
                position: Self::parse_index(position, token, line, content)?
                    .ok_or_else(|| malformed("missing position index"))?,
                texcoord: None,
                normal: None,
            }),
            [position, texcoord, normal] => Ok(Self {
                position: Self::parse_index(position, token, line, content)?
                    .ok_or_else(|| malformed("missing position index"))?,
                texcoord: Self::parse_index(texcoord, token, line, content)?,
                normal: Some(
                    Self::parse_index(normal, token, line, content)?
                        .ok_or_else(|| malformed("missing normal index"))?,
                ),
            }),
            _ => Err(malformed("expected 1 or 3 '/'-separated parts")),
        }
    }

    /// Parse one index field. An empty field is `None`.
    fn parse_index(field: &str, token: &str, line: usize, content: &str) -> Result<Option<usize>, ObjError> {
        if field.is_empty() {
            return Ok(None);
        }
        if field.starts_with('-') {
            return Err(ObjError::RelativeIndex {
                line,
                token: token.to_string(),
            });
        }
        let index = field.parse::<usize>().map_err(|_| ObjError::NumberFormat {
            line,
            token: token.to_string(),
            content: content.to_string(),
        })?;
        if index == 0 {
            return Err(ObjError::MalformedFaceToken {
                line,
                token: token.to_string(),
                reason: "indices are 1-based, 0 is not valid",
            });
        }
        Ok(Some(index))
    }
}
