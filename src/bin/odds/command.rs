//! Commands accepted at the `odds` prompt.

use clap::Parser;
use poker_odds::Card;

#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub enum Command {
    #[command(
        name = "newgame",
        about = "Start a new game; deals random hole cards if none are given"
    )]
    NewGame {
        #[arg(required = true)]
        players: usize,
        card1: Option<Card>,
        card2: Option<Card>,
    },
    #[command(name = "flop", about = "Put the three flop cards on the board")]
    Flop {
        #[arg(required = true)]
        card1: String,
        #[arg(required = true)]
        card2: String,
        #[arg(required = true)]
        card3: String,
    },
    #[command(name = "turn", about = "Put the turn card on the board")]
    Turn {
        #[arg(required = true)]
        card: String,
    },
    #[command(name = "river", about = "Put the river card on the board")]
    River {
        #[arg(required = true)]
        card: String,
    },
    #[command(
        name = "calculatewin",
        about = "Win probability against the dealt opponent hands",
        alias = "win"
    )]
    CalculateWin,
    #[command(
        name = "calculateequity",
        about = "Win probability against random opponent hands",
        alias = "equity"
    )]
    CalculateEquity,
    #[command(
        name = "calculatehit",
        about = "Probability that some opponent makes a hand category or better",
        alias = "hit"
    )]
    CalculateHit { hand_type: Vec<String> },
    #[command(name = "revealed", about = "Mark a card as seen outside the board")]
    Revealed {
        #[arg(required = true)]
        card: Card,
    },
    #[command(name = "addtoplayer", about = "Give a known card to an opponent")]
    AddToPlayer {
        #[arg(required = true)]
        name: String,
        #[arg(required = true)]
        card: Card,
    },
    #[command(name = "outs", about = "List the holdings that beat you right now")]
    Outs,
    #[command(name = "showhands", about = "Show every known hand")]
    ShowHands,
    #[command(name = "exit", about = "Leave the prompt", alias = "quit")]
    Exit,
}

impl Command {
    /// Parse one prompt line.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_newgame() {
        assert_eq!(
            Command::parse_line("newgame 6 As Kd").unwrap(),
            Command::NewGame {
                players: 6,
                card1: Some(card("As")),
                card2: Some(card("Kd")),
            }
        );
        assert_eq!(
            Command::parse_line("newgame 3").unwrap(),
            Command::NewGame {
                players: 3,
                card1: None,
                card2: None,
            }
        );
        assert!(Command::parse_line("newgame").is_err());
        assert!(Command::parse_line("newgame six").is_err());
        assert!(Command::parse_line("newgame 2 Xx").is_err());
    }

    #[test]
    fn test_board_commands() {
        assert_eq!(
            Command::parse_line("flop Kh 9c 2d").unwrap(),
            Command::Flop {
                card1: "Kh".to_string(),
                card2: "9c".to_string(),
                card3: "2d".to_string(),
            }
        );
        assert!(Command::parse_line("flop Kh 9c").is_err());
        assert_eq!(
            Command::parse_line("turn 10s").unwrap(),
            Command::Turn {
                card: "10s".to_string()
            }
        );
        assert!(Command::parse_line("river").is_err());
    }

    #[test]
    fn test_estimation_commands() {
        assert_eq!(Command::parse_line("calculatewin").unwrap(), Command::CalculateWin);
        assert_eq!(Command::parse_line("equity").unwrap(), Command::CalculateEquity);
        assert_eq!(
            Command::parse_line("calculatehit").unwrap(),
            Command::CalculateHit { hand_type: vec![] }
        );
        assert_eq!(
            Command::parse_line("calculatehit full house").unwrap(),
            Command::CalculateHit {
                hand_type: vec!["full".to_string(), "house".to_string()]
            }
        );
    }

    #[test]
    fn test_card_commands() {
        assert_eq!(
            Command::parse_line("revealed 7c").unwrap(),
            Command::Revealed { card: card("7c") }
        );
        assert_eq!(
            Command::parse_line("addtoplayer player2 Qd").unwrap(),
            Command::AddToPlayer {
                name: "player2".to_string(),
                card: card("Qd"),
            }
        );
        assert!(Command::parse_line("addtoplayer player2").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(Command::parse_line("outs").unwrap(), Command::Outs);
        assert_eq!(Command::parse_line("showhands").unwrap(), Command::ShowHands);
        assert_eq!(Command::parse_line("quit").unwrap(), Command::Exit);
        assert!(Command::parse_line("shuffle").is_err());

        let help = Command::parse_line("help").unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
