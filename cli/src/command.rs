use minefield_core::Coord2;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Quit,
}

pub const USAGE: &str = "commands: r ROW COL (reveal), f ROW COL (flag), n (new game), q (quit)";

impl Command {
    /// Parses a command line; `None` for blank input or anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "n" | "new" => Self::NewGame,
            "q" | "quit" => Self::Quit,
            _ => return None,
        };
        words.next().is_none().then_some(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<Coord2> {
    let row = words.next()?.parse().ok()?;
    let col = words.next()?.parse().ok()?;
    Some((row, col))
}
