//! Enemies: a `MobileCombatant` body plus an attack strategy
//!
//! All archetypes share one `update` entry point. The `TickContext` hands
//! every enemy the same view of the frame (player, player shots, sibling
//! obstacles); each strategy uses only the parts it needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::{MobileCombatant, Obstacle};
use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use super::wave::EnemyClass;
use crate::tuning::{Archetype, AttackSpec, EnemyTuning};

/// Attack behaviour selected at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttackStrategy {
    /// Contact damage when the cooldown expires
    Melee,
    /// Aimed shots on cooldown; in-flight shots are owned here
    Ranged {
        projectile_speed: f32,
        projectiles: Vec<Projectile>,
    },
    /// Melee plus a cosmetic area effect re-armed on every cooldown reset
    AreaMelee { area_duration: u32, area_timer: u32 },
}

impl AttackStrategy {
    fn from_spec(spec: &AttackSpec) -> Self {
        match *spec {
            AttackSpec::Melee => AttackStrategy::Melee,
            AttackSpec::Ranged { projectile_speed } => AttackStrategy::Ranged {
                projectile_speed,
                projectiles: Vec::new(),
            },
            AttackSpec::AreaMelee { area_duration } => AttackStrategy::AreaMelee {
                area_duration,
                area_timer: 0,
            },
        }
    }
}

/// Per-frame view handed to every enemy update
pub struct TickContext<'a> {
    pub player: &'a mut Player,
    /// Player shots in flight; only read during the enemy pass
    pub player_shots: &'a [Projectile],
    /// Shots already consumed this frame (same length as `player_shots`)
    pub spent_shots: &'a mut [bool],
    /// Live enemy bodies for steering
    pub obstacles: &'a [Obstacle],
    pub tuning: &'a EnemyTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: MobileCombatant,
    /// Visual variant key
    pub sprite: String,
    pub damage: i32,
    attack_cooldown: u32,
    attack_timer: u32,
    pub strategy: AttackStrategy,
}

impl Enemy {
    /// Instantiate `archetype` with its top-left corner at `pos`
    pub fn spawn(id: u32, archetype: &Archetype, pos: Vec2) -> Self {
        Self {
            body: MobileCombatant::new(id, pos, archetype.size, archetype.health, archetype.speed),
            sprite: archetype.sprite.clone(),
            damage: archetype.damage,
            attack_cooldown: archetype.attack_cooldown,
            attack_timer: 0,
            strategy: AttackStrategy::from_spec(&archetype.attack),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.body.id
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    pub fn class(&self) -> EnemyClass {
        match self.strategy {
            AttackStrategy::Melee => EnemyClass::Melee,
            AttackStrategy::Ranged { .. } => EnemyClass::Ranged,
            AttackStrategy::AreaMelee { .. } => EnemyClass::Fluid,
        }
    }

    pub fn attack_timer(&self) -> u32 {
        self.attack_timer
    }

    pub fn obstacle(&self) -> Obstacle {
        Obstacle {
            id: self.body.id,
            rect: self.body.rect,
        }
    }

    /// Shots this enemy has in flight
    pub fn projectiles(&self) -> &[Projectile] {
        match &self.strategy {
            AttackStrategy::Ranged { projectiles, .. } => projectiles,
            _ => &[],
        }
    }

    /// Whether the area effect should be drawn this frame
    pub fn area_effect_active(&self) -> bool {
        matches!(self.strategy, AttackStrategy::AreaMelee { area_timer, .. } if area_timer > 0)
    }

    /// Advance one frame. Returns true on the frame this enemy dies.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> bool {
        match self.strategy {
            AttackStrategy::Melee | AttackStrategy::AreaMelee { .. } => self.update_melee(ctx),
            AttackStrategy::Ranged { .. } => self.update_ranged(ctx),
        }
    }

    fn update_melee(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let target = ctx.player.center();
        if self.body.pos().distance(target) <= ctx.tuning.melee_detection_radius {
            self.body.move_towards(target, ctx.obstacles);
        }

        // Cooldown runs whether or not the player is in reach
        self.attack_timer += 1;
        if self.attack_timer >= self.attack_cooldown {
            self.attack_timer = 0;
            self.strike(ctx.player, ctx.tuning.splat_duration);
        }
        self.body.tick_splat();

        if let AttackStrategy::AreaMelee {
            area_duration,
            ref mut area_timer,
        } = self.strategy
        {
            *area_timer = area_timer.saturating_sub(1);
            if self.attack_timer == 0 {
                *area_timer = area_duration;
            }
        }

        self.absorb_player_shots(ctx)
    }

    fn update_ranged(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let target = ctx.player.center();
        let distance = self.body.pos().distance(target);
        if distance <= ctx.tuning.ranged_detection_radius {
            if distance > ctx.tuning.standoff_distance {
                self.body.move_towards(target, &[]);
            }
            if self.attack_timer >= self.attack_cooldown {
                self.fire_at(target, ctx.tuning.projectile_size);
                self.attack_timer = 0;
            }
        }
        self.attack_timer += 1;

        let damage = self.damage;
        let player = &mut *ctx.player;
        if let AttackStrategy::Ranged { projectiles, .. } = &mut self.strategy {
            for p in projectiles.iter_mut() {
                p.advance();
            }
            projectiles.retain(|p| {
                if p.hits(&player.rect) {
                    player.handle_damage(damage);
                    false
                } else {
                    true
                }
            });
        }

        self.absorb_player_shots(ctx)
    }

    /// Melee contact: only lands if the boxes overlap right now
    fn strike(&mut self, player: &mut Player, splat_duration: u32) {
        if self.body.rect.overlaps(&player.rect) {
            player.handle_damage(self.damage);
            self.body.mark_contact(player.center(), splat_duration);
        }
    }

    fn fire_at(&mut self, target: Vec2, size: Vec2) {
        let origin = self.body.center();
        let damage = self.damage;
        if let AttackStrategy::Ranged {
            projectile_speed,
            projectiles,
        } = &mut self.strategy
        {
            projectiles.push(Projectile::aimed(origin, target, *projectile_speed, size, damage));
        }
    }

    /// Take the first unspent player shot overlapping this body
    fn absorb_player_shots(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let shots = ctx.player_shots;
        let hit = shots
            .iter()
            .enumerate()
            .find(|(i, shot)| !ctx.spent_shots[*i] && shot.hits(&self.body.rect));
        match hit {
            Some((i, shot)) => {
                ctx.spent_shots[i] = true;
                self.body.receive_damage(shot.damage, shot.center())
            }
            None => false,
        }
    }

    /// Drop own shots that have left `bounds`
    pub fn discard_offscreen(&mut self, bounds: &Rect) {
        if let AttackStrategy::Ranged { projectiles, .. } = &mut self.strategy {
            projectiles.retain(|p| p.rect.overlaps(bounds));
        }
    }
}
