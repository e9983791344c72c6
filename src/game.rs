//! Snake rules: positions, directions, and one tick of movement.
//!
//! Nothing in here draws or reads input. The loop feeds a direction in,
//! calls [`Game::step`], and renders whatever state comes out.

use std::collections::VecDeque;

use rand::Rng;

/// A position on the playfield, in pixels. Always a multiple of the block
/// size while the snake is on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The two axes the snake can travel along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction of movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Not moving yet. Every fresh session starts here.
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Option<Axis> {
        match self {
            Direction::None => None,
            Direction::Up | Direction::Down => Some(Axis::Vertical),
            Direction::Left | Direction::Right => Some(Axis::Horizontal),
        }
    }

    /// Per-tick offset when moving this way with the given block size.
    pub fn delta(self, block: i32) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -block),
            Direction::Down => (0, block),
            Direction::Left => (-block, 0),
            Direction::Right => (block, 0),
        }
    }

    /// Only perpendicular turns are allowed. Turning along the current
    /// axis would either be a no-op or a reversal into the neck.
    pub fn can_turn_to(self, next: Direction) -> bool {
        match next.axis() {
            Some(axis) => self.axis() != Some(axis),
            None => false,
        }
    }
}

/// Playfield geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub block: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, block: i32) -> Self {
        Self {
            width,
            height,
            block,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.block
    }

    pub fn rows(&self) -> i32 {
        self.height / self.block
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// The block-aligned cell closest to the middle of the playfield.
    pub fn center(&self) -> Point {
        Point::new(
            self.width / 2 / self.block * self.block,
            self.height / 2 / self.block * self.block,
        )
    }

    /// A uniformly random, block-aligned cell with
    /// `x` in `[0, width - block)` and `y` in `[0, height - block)`.
    ///
    /// Callers must have validated the grid (at least two blocks per axis),
    /// otherwise the sampled range is empty.
    pub fn random_cell(&self, rng: &mut impl Rng) -> Point {
        let x_cells = (self.width - self.block) / self.block;
        let y_cells = (self.height - self.block) / self.block;
        Point::new(
            rng.gen_range(0..x_cells) * self.block,
            rng.gen_range(0..y_cells) * self.block,
        )
    }
}

/// What a head collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Result of advancing the snake by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head moved (or stood still, with no direction yet).
    Moved,
    /// The head landed on the food. The snake grows over the next tick.
    Ate,
    /// The head would have left the grid or hit the body. The state is
    /// left exactly as it was before the step.
    Collided(Collision),
}

/// One game session's worth of state.
#[derive(Debug, Clone)]
pub struct Game {
    /// Oldest segment at the front, head at the back.
    body: VecDeque<Point>,
    direction: Direction,
    food: Point,
    target_len: usize,
}

impl Game {
    /// A fresh session: one segment in the middle of the grid, standing
    /// still, with food somewhere random.
    pub fn new(grid: &Grid, rng: &mut impl Rng) -> Self {
        let mut body = VecDeque::new();
        body.push_back(grid.center());
        Self {
            body,
            direction: Direction::None,
            food: grid.random_cell(rng),
            target_len: 1,
        }
    }

    /// Builds a game from an explicit layout, oldest segment first. The
    /// target length is the length of the given body.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn from_parts(
        body: impl IntoIterator<Item = Point>,
        direction: Direction,
        food: Point,
    ) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");
        let target_len = body.len();
        Self {
            body,
            direction,
            food,
            target_len,
        }
    }

    pub fn head(&self) -> Point {
        // `from_parts` and `new` never build an empty body, and `step` only
        // trims down to `target_len`, which is at least one.
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Food eaten so far.
    pub fn score(&self) -> usize {
        self.target_len - 1
    }

    /// Turns the snake if `next` is on the other axis. Returns whether the
    /// direction changed.
    pub fn steer(&mut self, next: Direction) -> bool {
        if self.direction.can_turn_to(next) {
            self.direction = next;
            true
        } else {
            false
        }
    }

    /// Advances the snake one block in its current direction.
    pub fn step(&mut self, grid: &Grid, rng: &mut impl Rng) -> StepOutcome {
        let head = self.head();
        // One block in the current direction. Standing still gives (0, 0).
        let (dx, dy) = self.direction.delta(grid.block);
        let new_head = Point::new(head.x + dx, head.y + dy);

        // 1. Walls. Nothing has moved yet, so a crash leaves the snake where
        //    it was for the game-over screen.
        if !grid.contains(new_head) {
            return StepOutcome::Collided(Collision::Wall);
        }

        // 2. Own body. The oldest segment is about to be trimmed this tick
        //    unless the snake is still growing, so it doesn't count.
        let trimmed = usize::from(self.body.len() + 1 > self.target_len);
        if self.body.iter().skip(trimmed).any(|segment| *segment == new_head) {
            return StepOutcome::Collided(Collision::Body);
        }

        // 3. Move: append the head, drop the tail if we're over length.
        //    Right after eating the target is one longer than the body, so
        //    the tail stays this once and the snake grows.
        self.body.push_back(new_head);
        while self.body.len() > self.target_len {
            self.body.pop_front();
        }

        // 4. Food. Growth shows up next tick, when the tail stops being
        //    trimmed.
        if new_head == self.food {
            self.food = grid.random_cell(rng);
            self.target_len += 1;
            return StepOutcome::Ate;
        }

        StepOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid() -> Grid {
        Grid::new(400, 200, 10)
    }

    #[test]
    fn test_turns_only_perpendicular() {
        assert!(Direction::Left.can_turn_to(Direction::Up));
        assert!(Direction::Up.can_turn_to(Direction::Right));
        assert!(!Direction::Left.can_turn_to(Direction::Right));
        assert!(!Direction::Left.can_turn_to(Direction::Left));
        assert!(!Direction::Up.can_turn_to(Direction::None));
        assert!(Direction::None.can_turn_to(Direction::Down));
    }

    #[test]
    fn test_delta() {
        assert_eq!(Direction::Up.delta(10), (0, -10));
        assert_eq!(Direction::Right.delta(10), (10, 0));
        assert_eq!(Direction::None.delta(10), (0, 0));
    }

    #[test]
    fn test_center_is_block_aligned() {
        assert_eq!(grid().center(), Point::new(200, 100));
        assert_eq!(Grid::new(450, 250, 10).center(), Point::new(220, 120));
    }

    #[test]
    fn test_random_cell_range() {
        let grid = grid();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = grid.random_cell(&mut rng);
            assert!(p.x >= 0 && p.x < grid.width - grid.block);
            assert!(p.y >= 0 && p.y < grid.height - grid.block);
            assert_eq!(p.x % grid.block, 0);
            assert_eq!(p.y % grid.block, 0);
        }
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut game =
            Game::from_parts([Point::new(50, 50)], Direction::Left, Point::new(0, 0));
        assert!(!game.steer(Direction::Right));
        assert!(!game.steer(Direction::Left));
        assert_eq!(game.direction(), Direction::Left);
        assert!(game.steer(Direction::Up));
        assert_eq!(game.direction(), Direction::Up);
    }

    #[test]
    fn test_idle_snake_stays_put() {
        let grid = grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::from_parts([Point::new(200, 100)], Direction::None, Point::new(0, 0));
        assert_eq!(game.step(&grid, &mut rng), StepOutcome::Moved);
        assert_eq!(game.head(), Point::new(200, 100));
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        // A 2x2 loop: the head steps onto the cell the tail leaves.
        let grid = grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::from_parts(
            [
                Point::new(10, 10),
                Point::new(20, 10),
                Point::new(20, 20),
                Point::new(10, 20),
            ],
            Direction::Up,
            Point::new(300, 150),
        );
        assert_eq!(game.step(&grid, &mut rng), StepOutcome::Moved);
        assert_eq!(game.head(), Point::new(10, 10));
        assert_eq!(game.len(), 4);
    }

    #[test]
    fn test_growing_snake_keeps_its_tail_solid() {
        // Same loop, but the snake just ate: the tail stays, so it bites it.
        let grid = grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::from_parts(
            [
                Point::new(30, 10),
                Point::new(20, 10),
                Point::new(20, 20),
                Point::new(10, 20),
            ],
            Direction::Up,
            Point::new(10, 10),
        );
        // Eat at (10, 10). The body is still 4 long but the target is 5.
        assert_eq!(game.step(&grid, &mut rng), StepOutcome::Ate);
        assert_eq!(game.len(), 4);
        assert_eq!(game.target_len(), 5);
        game.steer(Direction::Right);
        assert_eq!(
            game.step(&grid, &mut rng),
            StepOutcome::Collided(Collision::Body)
        );
    }

    #[test]
    fn test_collision_leaves_state_untouched() {
        let grid = grid();
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::from_parts([Point::new(390, 50)], Direction::Right, Point::new(0, 0));
        assert_eq!(
            game.step(&grid, &mut rng),
            StepOutcome::Collided(Collision::Wall)
        );
        assert_eq!(game.head(), Point::new(390, 50));
        assert_eq!(game.len(), 1);
    }
}
