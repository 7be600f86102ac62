pub const INITIAL_LENGTH: i16 = 3;

/// A grid cell; `x` is the column and `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(&self, grid_size: i16) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl From<(i16, i16)> for Position {
    fn from(pos: (i16, i16)) -> Self {
        Position { x: pos.0, y: pos.1 }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn offset(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Body segments head-first. The pending direction is only committed on
/// `advance`, so two quick turns between ticks can't fold the head back
/// onto the neck.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    next_direction: Direction,
    grow_pending: bool,
}

impl Snake {
    pub fn new(grid_size: i16) -> Self {
        let mut snake = Snake {
            body: Vec::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            grow_pending: false,
        };
        snake.reset(grid_size);
        snake
    }

    pub fn reset(&mut self, grid_size: i16) {
        let mid = grid_size / 2;
        self.body.clear();
        for i in 0..INITIAL_LENGTH {
            self.body.push(Position::new(mid - i, mid));
        }
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.grow_pending = false;
    }

    pub fn change_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            return;
        }
        self.next_direction = requested;
    }

    pub fn advance(&mut self) {
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);
        self.body.insert(0, new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop();
        }
    }

    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Must run right after `advance`, before any food check.
    pub fn detect_collision(&self, grid_size: i16) -> bool {
        let head = self.head();
        !head.in_bounds(grid_size) || self.body[1..].contains(&head)
    }

    pub fn head_at(&self, pos: Position) -> bool {
        self.head() == pos
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    #[cfg(test)]
    pub fn from_parts(body: Vec<Position>, direction: Direction) -> Self {
        Snake {
            body,
            direction,
            next_direction: direction,
            grow_pending: false,
        }
    }
}
