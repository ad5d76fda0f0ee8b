//! The persisted game record and its transitions.

use super::contracts::{Contract, DistinctPlayers, PlayContract};
use super::error::ProgramError;
use super::{Board, GameState, Identity, Mark, Move, Tile, rules};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// State of a single match.
///
/// Created once by [`GameRecord::setup`] and advanced by
/// [`GameRecord::play`] until it reaches `Tie` or `Won`, after which it never
/// changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub(crate) players: [Identity; 2],
    pub(crate) turn: u8,
    pub(crate) board: Board,
    pub(crate) state: GameState,
}

impl GameRecord {
    /// Creates a fresh record: turn 1, empty board, `Active`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetup` if both identities are the same.
    #[instrument]
    pub fn setup(player_one: Identity, player_two: Identity) -> Result<Self, ProgramError> {
        DistinctPlayers::check(&player_one, &player_two)?;
        info!(%player_one, %player_two, "Game record set up");
        Ok(Self {
            players: [player_one, player_two],
            turn: 1,
            board: Board::new(),
            state: GameState::Active,
        })
    }

    /// Players in move order: `[X, O]`.
    pub fn players(&self) -> &[Identity; 2] {
        &self.players
    }

    /// Turn counter, starting at 1.
    pub fn turn(&self) -> u8 {
        self.turn
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 0 on odd turns, 1 on even turns.
    pub fn current_player_index(&self) -> usize {
        if self.turn % 2 == 1 { 0 } else { 1 }
    }

    /// Identity expected to sign the next play, or `None` once terminal.
    pub fn current_player(&self) -> Option<&Identity> {
        self.is_active()
            .then(|| &self.players[self.current_player_index()])
    }

    /// Returns true while moves are accepted.
    pub fn is_active(&self) -> bool {
        !self.state.is_terminal()
    }

    /// True iff all 9 squares hold a mark.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// True iff `mark` fills any row, column or diagonal.
    pub fn winning_line_for(&self, mark: Mark) -> bool {
        rules::winning_line_for(&self.board, mark)
    }

    /// Mark used by `identity`, if they are one of the players.
    pub fn mark_of(&self, identity: &Identity) -> Option<Mark> {
        self.players
            .iter()
            .position(|p| p == identity)
            .map(Mark::for_player_index)
    }

    /// Empty tiles in row-major order. Empty once the game is over.
    pub fn open_tiles(&self) -> Vec<Tile> {
        if !self.is_active() {
            return Vec::new();
        }
        (0..9)
            .filter(|&i| self.board.is_empty(i))
            .filter_map(Tile::from_index)
            .collect()
    }

    /// Places the signer's mark, then scores the result.
    ///
    /// Preconditions are checked in order (`GameAlreadyOver`,
    /// `NotPlayersTurn`, `TileOutOfBounds`, `TileAlreadySet`) and all of them
    /// pass before the record is written. A win is scored before a tie.
    ///
    /// # Errors
    ///
    /// Returns the first failing precondition; the record is unchanged.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn play(&mut self, action: &Move) -> Result<(), ProgramError> {
        let index = PlayContract::pre(self, action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mark = Mark::for_player_index(self.current_player_index());
        self.board.place(index, mark);
        self.turn += 1;

        if rules::completes_line(&self.board, index, mark) {
            self.state = GameState::Won {
                winner: action.signer().clone(),
            };
            info!(winner = %action.signer(), %mark, turn = self.turn, "Game won");
        } else if rules::is_full(&self.board) {
            self.state = GameState::Tie;
            info!(turn = self.turn, "Game tied");
        } else {
            debug!(%mark, tile = %action.tile(), turn = self.turn, "Mark placed");
        }

        #[cfg(debug_assertions)]
        {
            let post = PlayContract::post(&before, self);
            debug_assert!(post.is_ok(), "Play postcondition failed: {:?}", post);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn alice() -> Identity {
        Identity::new("alice")
    }

    fn bob() -> Identity {
        Identity::new("bob")
    }

    fn play(record: &mut GameRecord, signer: Identity, row: u8, column: u8) {
        record
            .play(&Move::new(signer, Tile::new(row, column)))
            .expect("legal move");
    }

    #[test]
    fn test_setup_state() {
        let record = GameRecord::setup(alice(), bob()).unwrap();
        assert_eq!(record.turn(), 1);
        assert_eq!(record.state(), &GameState::Active);
        assert_eq!(record.players(), &[alice(), bob()]);
        assert_eq!(record.board(), &Board::new());
        assert_eq!(record.current_player(), Some(&alice()));
    }

    #[test]
    fn test_setup_rejects_duplicate_players() {
        assert!(matches!(
            GameRecord::setup(alice(), alice()),
            Err(ProgramError::InvalidSetup { .. })
        ));
    }

    #[test]
    fn test_current_player_alternates() {
        let mut record = GameRecord::setup(alice(), bob()).unwrap();
        assert_eq!(record.current_player_index(), 0);
        play(&mut record, alice(), 0, 0);
        assert_eq!(record.current_player_index(), 1);
        assert_eq!(record.current_player(), Some(&bob()));
        play(&mut record, bob(), 1, 1);
        assert_eq!(record.current_player_index(), 0);
    }

    #[test]
    fn test_play_places_mark_for_current_player() {
        let mut record = GameRecord::setup(alice(), bob()).unwrap();
        play(&mut record, alice(), 0, 0);
        play(&mut record, bob(), 2, 1);
        assert_eq!(record.board().get(0), Some(Square::Occupied(Mark::X)));
        assert_eq!(record.board().get(7), Some(Square::Occupied(Mark::O)));
        assert_eq!(record.turn(), 3);
    }

    #[test]
    fn test_rejected_play_leaves_record_unchanged() {
        let mut record = GameRecord::setup(alice(), bob()).unwrap();
        play(&mut record, alice(), 0, 0);
        let snapshot = record.clone();

        let result = record.play(&Move::new(bob(), Tile::new(0, 0)));
        assert!(matches!(result, Err(ProgramError::TileAlreadySet { .. })));
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_open_tiles() {
        let mut record = GameRecord::setup(alice(), bob()).unwrap();
        assert_eq!(record.open_tiles().len(), 9);
        play(&mut record, alice(), 1, 1);
        let open = record.open_tiles();
        assert_eq!(open.len(), 8);
        assert!(!open.contains(&Tile::new(1, 1)));
    }

    #[test]
    fn test_won_game_freezes() {
        let mut record = GameRecord::setup(alice(), bob()).unwrap();
        play(&mut record, alice(), 0, 0);
        play(&mut record, bob(), 1, 0);
        play(&mut record, alice(), 0, 1);
        play(&mut record, bob(), 1, 1);
        play(&mut record, alice(), 0, 2);

        assert_eq!(record.state(), &GameState::Won { winner: alice() });
        assert_eq!(record.turn(), 6);
        assert!(record.winning_line_for(Mark::X));
        assert_eq!(record.current_player(), None);
        assert!(record.open_tiles().is_empty());

        let snapshot = record.clone();
        let result = record.play(&Move::new(bob(), Tile::new(2, 2)));
        assert_eq!(result, Err(ProgramError::GameAlreadyOver));
        assert_eq!(record, snapshot);
    }
}
