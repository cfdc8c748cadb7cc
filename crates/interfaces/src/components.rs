use bevy::prelude::*;

//the player driven by this client's mouse and keyboard
#[derive(Component, Default, Reflect, Clone, Copy, Debug)]
#[reflect(Component)]
pub struct LocalPlayer;

//where the view ray starts and which way it points, usually the camera
//stored on the player so systems don't have to walk the hierarchy
#[derive(Component, Clone, Copy, Debug)]
pub struct AimOrigin(pub Entity);

//optional visual start point for things the player shoots, like the hand or a gun barrel
#[derive(Component, Clone, Copy, Debug)]
pub struct FirePoint(pub Entity);
