//! Object-per-line text encoding of entity buffers.
//!
//! Every top-level object becomes one newline-terminated line: a variant
//! character, the fixed metadata fields, then the variant payload. The
//! grammar and the escaping table are a wire contract; both must be
//! reproduced exactly.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use geo::Coord;
use waymark_core::{
    Buffer, Changeset, Handler, Meta, Path, Point, Relation, TagCollection, apply,
};

use crate::EncodeError;

/// Buffer-to-bytes conversion used by the writer pipeline.
///
/// Implementations run on worker threads, one buffer per task, so they
/// must be shareable across threads. The pipeline treats an empty block
/// as its end-of-stream sentinel; formats therefore only return an empty
/// block for a buffer that produced no output at all.
pub trait BlockFormat: Send + Sync + 'static {
    /// Encode one buffer into a finished block of bytes.
    ///
    /// # Errors
    /// A failed encode fails this buffer's task only.
    fn encode(&self, buffer: Buffer) -> Result<String, EncodeError>;
}

/// The object-per-line text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl BlockFormat for LineFormat {
    fn encode(&self, buffer: Buffer) -> Result<String, EncodeError> {
        LineEncoder::new(buffer).encode()
    }
}

/// Single-use encoder turning one buffer into one text block.
///
/// The encoder is constructed around the buffer it will consume and acts
/// as its own traversal handler. [`LineEncoder::encode`] takes `self` by
/// value, so a second conversion of the same encoder is a compile error
/// rather than a runtime surprise.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{Buffer, Entity, Meta, Point, TagCollection};
/// use waymark_io::LineEncoder;
///
/// let mut buffer = Buffer::new();
/// buffer.push(Entity::Point(Point::new(
///     Meta::new(1, 1),
///     TagCollection::new(),
///     Some(Coord { x: 9.5, y: 47.1 }),
/// )));
/// let block = LineEncoder::new(buffer).encode()?;
/// assert!(block.starts_with("n1 v1 dV"));
/// assert!(block.ends_with(" x9.5000000 y47.1000000\n"));
/// # Ok::<(), waymark_io::EncodeError>(())
/// ```
#[derive(Debug)]
pub struct LineEncoder {
    buffer: Buffer,
    out: String,
}

impl LineEncoder {
    /// Take ownership of the buffer to encode.
    pub const fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            out: String::new(),
        }
    }

    /// Run one traversal over the buffer and return the finished block.
    ///
    /// # Errors
    /// Returns the first [`EncodeError`] hit during the traversal; the
    /// partial block is discarded.
    pub fn encode(mut self) -> Result<String, EncodeError> {
        let buffer = std::mem::take(&mut self.buffer);
        apply(&buffer, &mut self)?;
        Ok(self.out)
    }

    fn write_meta(&mut self, meta: &Meta, tags: &TagCollection) -> Result<(), EncodeError> {
        write!(self.out, "{} v{} d", meta.id, meta.version)?;
        self.out.push(if meta.visible { 'V' } else { 'D' });
        write!(self.out, " c{} t", meta.changeset)?;
        write_timestamp(&mut self.out, &meta.timestamp)?;
        write!(self.out, " i{} u", meta.uid)?;
        append_escaped(&mut self.out, &meta.user)?;
        self.out.push_str(" T");
        self.write_tags(tags)
    }

    fn write_tags(&mut self, tags: &TagCollection) -> Result<(), EncodeError> {
        let mut first = true;
        for tag in tags {
            if first {
                first = false;
            } else {
                self.out.push(',');
            }
            append_escaped(&mut self.out, &tag.key)?;
            self.out.push('=');
            append_escaped(&mut self.out, &tag.value)?;
        }
        Ok(())
    }

    // Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    fn write_location(
        &mut self,
        id: i64,
        location: Option<Coord<f64>>,
        x: char,
        y: char,
    ) -> Result<(), EncodeError> {
        match location {
            Some(coord) if !(coord.x.is_finite() && coord.y.is_finite()) => {
                Err(EncodeError::NonFiniteCoordinate {
                    id,
                    lon: coord.x,
                    lat: coord.y,
                })
            }
            Some(coord) => {
                write!(self.out, " {x}{:.7} {y}{:.7}", coord.x, coord.y)?;
                Ok(())
            }
            // An unplaced location renders as the bare axis characters.
            None => {
                self.out.push(' ');
                self.out.push(x);
                self.out.push(' ');
                self.out.push(y);
                Ok(())
            }
        }
    }
}

impl Handler for LineEncoder {
    type Error = EncodeError;

    fn point(&mut self, point: &Point) -> Result<(), EncodeError> {
        self.out.push('n');
        self.write_meta(&point.meta, &point.tags)?;
        self.write_location(point.meta.id, point.location, 'x', 'y')?;
        self.out.push('\n');
        Ok(())
    }

    fn path(&mut self, path: &Path) -> Result<(), EncodeError> {
        self.out.push('w');
        self.write_meta(&path.meta, &path.tags)?;
        self.out.push_str(" N");
        let mut first = true;
        for node in &path.nodes {
            if first {
                first = false;
            } else {
                self.out.push(',');
            }
            write!(self.out, "n{}", node.id)?;
        }
        self.out.push('\n');
        Ok(())
    }

    fn relation(&mut self, relation: &Relation) -> Result<(), EncodeError> {
        self.out.push('r');
        self.write_meta(&relation.meta, &relation.tags)?;
        self.out.push_str(" M");
        let mut first = true;
        for member in &relation.members {
            if first {
                first = false;
            } else {
                self.out.push(',');
            }
            self.out.push(member.kind.as_char());
            write!(self.out, "{}@", member.id)?;
            self.out.push_str(&member.role);
        }
        self.out.push('\n');
        Ok(())
    }

    fn changeset(&mut self, changeset: &Changeset) -> Result<(), EncodeError> {
        write!(self.out, "c{} k{} s", changeset.id, changeset.num_changes)?;
        write_timestamp(&mut self.out, &changeset.created_at)?;
        self.out.push_str(" e");
        write_timestamp(&mut self.out, &changeset.closed_at)?;
        write!(self.out, " i{} u", changeset.uid)?;
        append_escaped(&mut self.out, &changeset.user)?;
        self.write_location(changeset.id, changeset.bounds.bottom_left(), 'x', 'y')?;
        self.write_location(changeset.id, changeset.bounds.top_right(), 'X', 'Y')?;
        self.out.push_str(" T");
        self.write_tags(&changeset.tags)?;
        self.out.push('\n');
        Ok(())
    }

    // Areas and standalone structural items have no line representation.
}

fn write_timestamp(out: &mut String, timestamp: &DateTime<Utc>) -> Result<(), EncodeError> {
    write!(out, "{}", timestamp.format("%Y-%m-%dT%H:%M:%SZ"))?;
    Ok(())
}

/// Escape `text` into `out` code point by code point.
///
/// Characters with meaning in the line grammar (space, comma, `@`, `=`,
/// `%`) and anything non-printing must never pass through bare. The
/// pass-through ranges below are a wire contract: printable ASCII minus
/// the grammar characters, plus two printable Unicode bands. Everything
/// else becomes `%` followed by at least four lowercase hex digits of
/// the code point.
fn append_escaped(out: &mut String, text: &str) -> Result<(), EncodeError> {
    for ch in text.chars() {
        let code = u32::from(ch);
        if passes_unescaped(code) {
            out.push(ch);
        } else {
            write!(out, "%{code:04x}")?;
        }
    }
    Ok(())
}

const fn passes_unescaped(code: u32) -> bool {
    matches!(
        code,
        0x0021..=0x0024
            | 0x0026..=0x002b
            | 0x002d..=0x003c
            | 0x003e..=0x003f
            | 0x0041..=0x007e
            | 0x00a1..=0x00ac
            | 0x00ae..=0x05ff
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use waymark_core::{
        Area, Bounds, Entity, MemberKind, PathNodeList, RelationMember, RelationMemberList, Ring,
        RingGroup,
    };

    fn escaped(text: &str) -> String {
        let mut out = String::new();
        append_escaped(&mut out, text).unwrap();
        out
    }

    #[rstest]
    #[case("foo", "foo")]
    #[case("a b", "a%0020b")]
    #[case("a=b", "a%003db")]
    #[case("a,b", "a%002cb")]
    #[case("you@home", "you%0040home")]
    #[case("50%", "50%0025")]
    #[case("caf\u{e9}", "caf\u{e9}")]
    #[case("\u{1f600}", "%1f600")]
    fn escaping_table(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escaped(input), expected);
    }

    fn meta(id: i64) -> Meta {
        Meta {
            id,
            version: 3,
            visible: true,
            changeset: 333,
            timestamp: Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(),
            uid: 21,
            user: "foo".into(),
        }
    }

    fn encode_one(entity: Entity) -> String {
        let buffer: Buffer = vec![entity].into();
        LineEncoder::new(buffer).encode().unwrap()
    }

    #[test]
    fn path_line_matches_grammar() {
        let path = Path::new(
            meta(17),
            TagCollection::from_pairs([("highway", "residential")]),
            PathNodeList::from_ids([1, 3, 2]),
        );
        assert_eq!(
            encode_one(Entity::Path(path)),
            "w17 v3 dV c333 t2014-01-01T00:00:00Z i21 ufoo T highway=residential N n1,n3,n2\n"
        );
    }

    #[test]
    fn point_line_renders_coordinates_to_seven_decimals() {
        let point = Point::new(
            meta(17),
            TagCollection::new(),
            Some(Coord { x: 9.5, y: 47.1 }),
        );
        assert_eq!(
            encode_one(Entity::Point(point)),
            "n17 v3 dV c333 t2014-01-01T00:00:00Z i21 ufoo T x9.5000000 y47.1000000\n"
        );
    }

    #[test]
    fn unplaced_point_renders_bare_axis_characters() {
        let point = Point::new(meta(17), TagCollection::new(), None);
        assert!(encode_one(Entity::Point(point)).ends_with(" T x y\n"));
    }

    #[test]
    fn deleted_revision_renders_d_flag() {
        let point = Point::new(
            Meta {
                visible: false,
                ..meta(9)
            },
            TagCollection::new(),
            None,
        );
        assert!(encode_one(Entity::Point(point)).starts_with("n9 v3 dD "));
    }

    #[test]
    fn relation_line_lists_members_with_kind_ref_and_role() {
        let members: RelationMemberList = [
            RelationMember::new(MemberKind::Path, 10, "outer"),
            RelationMember::new(MemberKind::Point, 11, ""),
            RelationMember::new(MemberKind::Relation, 12, "sub"),
        ]
        .into_iter()
        .collect();
        let relation = Relation::new(meta(8), TagCollection::new(), members);
        assert_eq!(
            encode_one(Entity::Relation(relation)),
            "r8 v3 dV c333 t2014-01-01T00:00:00Z i21 ufoo T M w10@outer,n11@,r12@sub\n"
        );
    }

    #[test]
    fn user_names_are_escaped_in_meta() {
        let point = Point::new(
            Meta {
                user: "two words".into(),
                ..meta(1)
            },
            TagCollection::new(),
            None,
        );
        assert!(encode_one(Entity::Point(point)).contains(" utwo%0020words "));
    }

    #[test]
    fn changeset_line_matches_grammar() {
        let mut bounds = Bounds::new();
        bounds.extend(Some(Coord { x: 1.0, y: 2.0 }));
        bounds.extend(Some(Coord { x: 3.0, y: 4.0 }));
        let changeset = Changeset {
            id: 55,
            num_changes: 7,
            created_at: Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(),
            closed_at: Utc.with_ymd_and_hms(2014, 1, 2, 12, 30, 0).unwrap(),
            uid: 21,
            user: "foo".into(),
            bounds,
            tags: TagCollection::from_pairs([("comment", "fixes")]),
        };
        assert_eq!(
            encode_one(Entity::Changeset(changeset)),
            "c55 k7 s2014-01-01T00:00:00Z e2014-01-02T12:30:00Z i21 ufoo \
             x1.0000000 y2.0000000 X3.0000000 Y4.0000000 T comment=fixes\n"
        );
    }

    #[test]
    fn changeset_without_bounds_renders_bare_axis_characters() {
        let changeset = Changeset {
            id: 55,
            user: "foo".into(),
            ..Changeset::default()
        };
        assert!(encode_one(Entity::Changeset(changeset)).contains(" ufoo x y X Y T"));
    }

    #[test]
    fn non_finite_coordinate_fails_the_block() {
        let point = Point::new(
            meta(17),
            TagCollection::new(),
            Some(Coord { x: f64::NAN, y: 0.0 }),
        );
        let buffer: Buffer = vec![Entity::Point(point)].into();
        let result = LineEncoder::new(buffer).encode();
        assert!(matches!(
            result,
            Err(EncodeError::NonFiniteCoordinate { id: 17, .. })
        ));
    }

    #[test]
    fn areas_and_structural_items_produce_no_output() {
        let area = Area::new(
            meta(5),
            TagCollection::new(),
            vec![RingGroup::new(Ring::from_ids([1, 2, 3, 1]))],
        )
        .unwrap();
        let buffer: Buffer = vec![
            Entity::Area(area),
            Entity::Tags(TagCollection::from_pairs([("k", "v")])),
        ]
        .into();
        assert_eq!(LineEncoder::new(buffer).encode().unwrap(), "");
    }

    #[test]
    fn items_encode_in_buffer_order() {
        let first = Point::new(meta(1), TagCollection::new(), None);
        let second = Point::new(meta(2), TagCollection::new(), None);
        let buffer: Buffer = vec![Entity::Point(first), Entity::Point(second)].into();
        let block = LineEncoder::new(buffer).encode().unwrap();
        let ids: Vec<_> = block
            .lines()
            .map(|line| line.split(' ').next().unwrap_or("").to_owned())
            .collect();
        assert_eq!(ids, ["n1", "n2"]);
    }

    #[test]
    fn format_wrapper_delegates_to_the_encoder() {
        let point = Point::new(meta(17), TagCollection::new(), None);
        let buffer: Buffer = vec![Entity::Point(point.clone())].into();
        let via_format = LineFormat.encode(buffer).unwrap();
        let via_encoder = encode_one(Entity::Point(point));
        assert_eq!(via_format, via_encoder);
    }
}
